/// Data models for content-service
///
/// This module defines structures for:
/// - Post: Social feed posts with image attachments
/// - PostAuthor: Denormalized author snapshot stamped onto posts
/// - User: Profile records, consumed read-only by account deletion
///
/// The serde renames pin the document field names stored in the document
/// store. They are the serialization contract for the `Posts` and `Users`
/// collections and must not drift when the Rust field names change.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection of post records, queryable by `userUID` equality
pub const POSTS_COLLECTION: &str = "Posts";

/// Collection of user records, keyed by the user's identity uid
pub const USERS_COLLECTION: &str = "Users";

/// A social feed post.
///
/// `image_urls` and `image_reference_ids` are parallel arrays: the entry at
/// index `i` of one describes the same image as index `i` of the other, and
/// they are always the same length. Reference IDs are the blob keys used to
/// delete the images when the post goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned id; `None` until the record is committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(rename = "imageURLs", default)]
    pub image_urls: Vec<String>,
    #[serde(rename = "imageReferenceIDs", default)]
    pub image_reference_ids: Vec<String>,
    /// Set once at creation; never updated afterwards
    #[serde(rename = "publishedDate")]
    pub published_date: DateTime<Utc>,
    /// Users who liked the post; disjoint from `disliked_ids`
    #[serde(rename = "likedIDs", default)]
    pub liked_ids: Vec<String>,
    #[serde(rename = "dislikedIDs", default)]
    pub disliked_ids: Vec<String>,
    // Author snapshot, taken at creation and not re-synced on profile edits
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userUID")]
    pub user_uid: String,
    #[serde(rename = "userProfileURL")]
    pub user_profile_url: String,
}

impl Post {
    /// New uncommitted post with no images, stamped with the author snapshot
    /// and the current time.
    pub fn new(text: impl Into<String>, author: &PostAuthor) -> Self {
        Self {
            id: None,
            text: text.into(),
            image_urls: Vec::new(),
            image_reference_ids: Vec::new(),
            published_date: Utc::now(),
            liked_ids: Vec::new(),
            disliked_ids: Vec::new(),
            user_name: author.user_name.clone(),
            user_uid: author.user_uid.clone(),
            user_profile_url: author.user_profile_url.clone(),
        }
    }
}

/// Author snapshot passed explicitly into the creation pipeline, instead of
/// being read from ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAuthor {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userUID")]
    pub user_uid: String,
    #[serde(rename = "userProfileURL")]
    pub user_profile_url: String,
}

/// Shape of a `Users` collection record. This service never writes users;
/// account deletion only removes the record and the profile image blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "profileImageURL")]
    pub profile_image_url: String,
    #[serde(rename = "profileImageReferenceID")]
    pub profile_image_reference_id: String,
}
