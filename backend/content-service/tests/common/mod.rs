//! In-memory fakes for the three backing stores
//!
//! Provides fake implementations of `BlobStore`, `DocumentStore` and
//! `IdentityProvider` that don't require real backends. Every successful
//! operation is appended to a journal shared by all three fakes, so tests
//! can assert ordering across stores (blobs before records, records before
//! the identity). Each fake also supports targeted failure injection.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blob_store::{BlobError, BlobStore};
use content_service::models::{Post, PostAuthor, POSTS_COLLECTION, USERS_COLLECTION};
use document_store::{Document, DocumentError, DocumentStore};
use identity_client::{Credential, IdentityError, IdentityProvider, ReauthToken};
use uuid::Uuid;

/// Ordered log of every successful store operation
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Fake blob store over a HashMap
pub struct MemoryBlobStore {
    journal: Journal,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    /// Fail the put with this zero-based sequence number
    fail_put_at: Mutex<Option<usize>>,
    puts_seen: Mutex<usize>,
    /// Keys whose delete fails with a non-not-found error
    failing_deletes: Mutex<Vec<String>>,
}

impl MemoryBlobStore {
    fn new(journal: Journal) -> Self {
        Self {
            journal,
            objects: Mutex::new(HashMap::new()),
            fail_put_at: Mutex::new(None),
            puts_seen: Mutex::new(0),
            failing_deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_put_at(&self, index: usize) {
        *self.fail_put_at.lock().unwrap() = Some(index);
    }

    pub fn fail_delete_of(&self, key: &str) {
        self.failing_deletes.lock().unwrap().push(key.to_string());
    }

    pub fn clear_failures(&self) {
        *self.fail_put_at.lock().unwrap() = None;
        self.failing_deletes.lock().unwrap().clear();
    }

    /// Seed an object without journaling (test fixture setup)
    pub fn seed(&self, key: &str, bytes: Vec<u8>) {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, BlobError> {
        let seen = {
            let mut puts = self.puts_seen.lock().unwrap();
            let seen = *puts;
            *puts += 1;
            seen
        };
        if *self.fail_put_at.lock().unwrap() == Some(seen) {
            return Err(BlobError::Store("injected put failure".to_string()));
        }

        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        self.journal.lock().unwrap().push(format!("blob put {}", key));
        Ok(self.url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        if self.failing_deletes.lock().unwrap().iter().any(|k| k == key) {
            return Err(BlobError::Store("injected delete failure".to_string()));
        }

        if self.objects.lock().unwrap().remove(key).is_none() {
            return Err(BlobError::NotFound(key.to_string()));
        }
        self.journal
            .lock()
            .unwrap()
            .push(format!("blob delete {}", key));
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        format!("https://cdn.test/{}", key)
    }
}

/// Fake document store over a HashMap keyed by (collection, id)
pub struct MemoryDocumentStore {
    journal: Journal,
    docs: Mutex<HashMap<(String, String), serde_json::Value>>,
    fail_next_create: Mutex<bool>,
    fail_queries: Mutex<bool>,
    /// (collection, id) pairs whose delete fails
    failing_deletes: Mutex<Vec<(String, String)>>,
}

impl MemoryDocumentStore {
    fn new(journal: Journal) -> Self {
        Self {
            journal,
            docs: Mutex::new(HashMap::new()),
            fail_next_create: Mutex::new(false),
            fail_queries: Mutex::new(false),
            failing_deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_next_create(&self) {
        *self.fail_next_create.lock().unwrap() = true;
    }

    pub fn fail_queries(&self) {
        *self.fail_queries.lock().unwrap() = true;
    }

    pub fn fail_delete_of(&self, collection: &str, id: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .push((collection.to_string(), id.to_string()));
    }

    pub fn clear_failures(&self) {
        *self.fail_next_create.lock().unwrap() = false;
        *self.fail_queries.lock().unwrap() = false;
        self.failing_deletes.lock().unwrap().clear();
    }

    /// Seed a record without journaling (test fixture setup)
    pub fn seed(&self, collection: &str, id: &str, data: serde_json::Value) {
        self.docs
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), data);
    }

    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.docs
            .lock()
            .unwrap()
            .contains_key(&(collection.to_string(), id.to_string()))
    }

    pub fn collection_len(&self, collection: &str) -> usize {
        self.docs
            .lock()
            .unwrap()
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> Result<String, DocumentError> {
        if std::mem::take(&mut *self.fail_next_create.lock().unwrap()) {
            return Err(DocumentError::Database("injected create failure".to_string()));
        }

        let id = Uuid::new_v4().to_string();
        self.docs
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.clone()), data);
        self.journal
            .lock()
            .unwrap()
            .push(format!("document create {}/{}", collection, id));
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, DocumentError> {
        self.docs
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            })
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, DocumentError> {
        if *self.fail_queries.lock().unwrap() {
            return Err(DocumentError::Database("injected query failure".to_string()));
        }

        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|((c, _), data)| {
                c == collection && data.get(field).and_then(|v| v.as_str()) == Some(value)
            })
            .map(|((_, id), data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentError> {
        let target = (collection.to_string(), id.to_string());
        if self.failing_deletes.lock().unwrap().contains(&target) {
            return Err(DocumentError::Database("injected delete failure".to_string()));
        }

        // Deleting a missing record succeeds, like the real store.
        self.docs.lock().unwrap().remove(&target);
        self.journal
            .lock()
            .unwrap()
            .push(format!("document delete {}/{}", collection, id));
        Ok(())
    }
}

/// Fake identity provider with one registered credential per uid
pub struct MemoryIdentityProvider {
    journal: Journal,
    passwords: Mutex<HashMap<String, String>>,
    deleted: Mutex<Vec<String>>,
    fail_delete: Mutex<bool>,
}

impl MemoryIdentityProvider {
    fn new(journal: Journal) -> Self {
        Self {
            journal,
            passwords: Mutex::new(HashMap::new()),
            deleted: Mutex::new(Vec::new()),
            fail_delete: Mutex::new(false),
        }
    }

    pub fn register(&self, uid: &str, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert(uid.to_string(), password.to_string());
    }

    pub fn fail_delete(&self) {
        *self.fail_delete.lock().unwrap() = true;
    }

    pub fn clear_failures(&self) {
        *self.fail_delete.lock().unwrap() = false;
    }

    pub fn exists(&self, uid: &str) -> bool {
        self.passwords.lock().unwrap().contains_key(uid)
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn reauthenticate(
        &self,
        uid: &str,
        credential: &Credential,
    ) -> Result<ReauthToken, IdentityError> {
        let passwords = self.passwords.lock().unwrap();
        match passwords.get(uid) {
            Some(password) if *password == credential.password => {
                self.journal
                    .lock()
                    .unwrap()
                    .push(format!("reauthenticate {}", uid));
                Ok(ReauthToken(format!("token-{}", uid)))
            }
            _ => Err(IdentityError::InvalidCredentials),
        }
    }

    async fn delete_identity(&self, uid: &str, token: &ReauthToken) -> Result<(), IdentityError> {
        if *self.fail_delete.lock().unwrap() {
            return Err(IdentityError::Provider {
                status: 503,
                message: "injected identity failure".to_string(),
            });
        }
        // The orchestrator must hand back the token issued at stage 1.
        if token.0 != format!("token-{}", uid) {
            return Err(IdentityError::InvalidCredentials);
        }

        self.passwords.lock().unwrap().remove(uid);
        self.deleted.lock().unwrap().push(uid.to_string());
        self.journal
            .lock()
            .unwrap()
            .push(format!("identity delete {}", uid));
        Ok(())
    }
}

/// All three fakes wired to one shared journal
pub struct TestStores {
    pub blob: Arc<MemoryBlobStore>,
    pub documents: Arc<MemoryDocumentStore>,
    pub identity: Arc<MemoryIdentityProvider>,
    pub journal: Journal,
}

pub fn stores() -> TestStores {
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));
    TestStores {
        blob: Arc::new(MemoryBlobStore::new(journal.clone())),
        documents: Arc::new(MemoryDocumentStore::new(journal.clone())),
        identity: Arc::new(MemoryIdentityProvider::new(journal.clone())),
        journal,
    }
}

impl TestStores {
    pub fn journal_entries(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    /// Position of the first journal entry matching `needle`, or a panic
    /// naming it - ordering assertions read better this way.
    pub fn journal_index(&self, needle: &str) -> usize {
        self.journal_entries()
            .iter()
            .position(|entry| entry.contains(needle))
            .unwrap_or_else(|| panic!("no journal entry matching '{}'", needle))
    }
}

pub fn author(uid: &str) -> PostAuthor {
    PostAuthor {
        user_name: "jamie".to_string(),
        user_uid: uid.to_string(),
        user_profile_url: format!("https://cdn.test/Profile_Images/{}", uid),
    }
}

/// Seed a committed post with the given image keys: blobs in the blob store,
/// record in the Posts collection. Returns the record id.
pub fn seed_post(stores: &TestStores, uid: &str, image_keys: &[&str]) -> String {
    let mut post = Post::new("seeded", &author(uid));
    for key in image_keys {
        stores.blob.seed(key, b"jpeg-bytes".to_vec());
        post.image_reference_ids.push(key.to_string());
        post.image_urls.push(format!("https://cdn.test/{}", key));
    }

    let id = Uuid::new_v4().to_string();
    stores.documents.seed(
        POSTS_COLLECTION,
        &id,
        serde_json::to_value(&post).expect("post serializes"),
    );
    id
}

/// Seed a full account: user record, profile image blob and registered
/// credential.
pub fn seed_account(stores: &TestStores, uid: &str, password: &str) {
    stores.identity.register(uid, password);
    stores
        .blob
        .seed(&format!("Profile_Images/{}", uid), b"profile-jpeg".to_vec());
    stores.documents.seed(
        USERS_COLLECTION,
        uid,
        serde_json::json!({
            "uid": uid,
            "userName": "jamie",
            "profileImageURL": format!("https://cdn.test/Profile_Images/{}", uid),
            "profileImageReferenceID": format!("Profile_Images/{}", uid),
        }),
    );
}
