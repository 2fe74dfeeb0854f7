//! Outbound ports: the two external collaborators the handler drives.
//!
//! Production adapters live in the `jedi-drop-handler` service; in-memory
//! implementations for tests and local replay live in [`crate::memory`].

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Outcome of an existence check.
///
/// Paired with `Result`, this gives the three cases callers branch on:
/// `Ok(Found)`, `Ok(NotFound)` and `Err(_)` for every other failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
}

impl Presence {
    pub fn is_found(self) -> bool {
        self == Presence::Found
    }
}

/// Bucketed object storage addressed by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the full body of an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes>;

    /// Create or overwrite an object.
    async fn put(&self, bucket: &str, key: &str, body: Bytes) -> Result<()>;

    /// Check whether an object exists. Only a genuine missing object maps to
    /// [`Presence::NotFound`].
    async fn head(&self, bucket: &str, key: &str) -> Result<Presence>;

    /// Every key currently in the bucket.
    async fn list(&self, bucket: &str) -> Result<Vec<String>>;

    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Encryption of opaque blobs under a named key.
#[async_trait]
pub trait KeyService: Send + Sync {
    async fn encrypt(&self, key_id: &str, plaintext: Bytes) -> Result<Bytes>;

    async fn decrypt(&self, key_id: &str, ciphertext: Bytes) -> Result<Bytes>;
}
