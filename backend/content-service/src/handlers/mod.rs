/// HTTP handlers for content lifecycle endpoints
///
/// This module contains handlers for:
/// - Posts: create a post, delete a post
/// - Account: cascading account deletion
///
/// The mobile client is the only consumer; rendering, image compression and
/// the credential challenge UI all live there.
pub mod account;
pub mod posts;

// Re-export handler functions at module level
pub use account::delete_account;
pub use posts::{create_post, delete_post};
