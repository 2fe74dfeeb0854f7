//! In-memory collaborators for tests and local replay.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::ports::{KeyService, ObjectStore, Presence};

type Bucket = BTreeMap<String, Bytes>;

/// Object store holding every bucket in a map.
///
/// Buckets spring into existence on first write.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    buckets: RwLock<HashMap<String, Bucket>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous peek for assertions; `None` when the object is absent.
    pub fn object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.buckets
            .read()
            .ok()?
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Keys in a bucket, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.buckets
            .read()
            .map(|buckets| {
                buckets
                    .get(bucket)
                    .map(|objects| objects.keys().cloned().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    fn poisoned(operation: &'static str, bucket: &str, key: &str) -> Error {
        Error::object_store(operation, bucket, key, "store lock poisoned")
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let buckets = self
            .buckets
            .read()
            .map_err(|_| Self::poisoned("get", bucket, key))?;
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
            .ok_or_else(|| Error::object_store("get", bucket, key, "no such key"))
    }

    async fn put(&self, bucket: &str, key: &str, body: Bytes) -> Result<()> {
        let mut buckets = self
            .buckets
            .write()
            .map_err(|_| Self::poisoned("put", bucket, key))?;
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body);
        Ok(())
    }

    async fn head(&self, bucket: &str, key: &str) -> Result<Presence> {
        let buckets = self
            .buckets
            .read()
            .map_err(|_| Self::poisoned("head", bucket, key))?;
        let found = buckets
            .get(bucket)
            .is_some_and(|objects| objects.contains_key(key));
        Ok(if found { Presence::Found } else { Presence::NotFound })
    }

    async fn list(&self, bucket: &str) -> Result<Vec<String>> {
        let buckets = self
            .buckets
            .read()
            .map_err(|_| Self::poisoned("list", bucket, ""))?;
        Ok(buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        let mut buckets = self
            .buckets
            .write()
            .map_err(|_| Self::poisoned("delete", bucket, key))?;
        if let Some(objects) = buckets.get_mut(bucket) {
            objects.remove(key);
        }
        Ok(())
    }
}

const TAG_LEN: usize = 8;

/// Key service that scrambles blobs with a BLAKE3 keystream derived from the
/// key id. Not encryption in any meaningful sense, but ciphertext never
/// equals plaintext and only the same key id can reverse it.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyService;

impl InMemoryKeyService {
    pub fn new() -> Self {
        Self
    }

    fn key_tag(key_id: &str) -> [u8; TAG_LEN] {
        let hash = blake3::derive_key("jedi-core in-memory key tag", key_id.as_bytes());
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&hash[..TAG_LEN]);
        tag
    }

    fn apply_keystream(key_id: &str, data: &[u8]) -> Vec<u8> {
        let key = blake3::derive_key("jedi-core in-memory keystream", key_id.as_bytes());
        let mut stream = blake3::Hasher::new_keyed(&key).finalize_xof();
        let mut pad = vec![0u8; data.len()];
        stream.fill(&mut pad);
        data.iter().zip(pad).map(|(byte, mask)| byte ^ mask).collect()
    }
}

#[async_trait]
impl KeyService for InMemoryKeyService {
    async fn encrypt(&self, key_id: &str, plaintext: Bytes) -> Result<Bytes> {
        let mut blob = Self::key_tag(key_id).to_vec();
        blob.extend(Self::apply_keystream(key_id, &plaintext));
        Ok(Bytes::from(blob))
    }

    async fn decrypt(&self, key_id: &str, ciphertext: Bytes) -> Result<Bytes> {
        if ciphertext.len() < TAG_LEN || ciphertext[..TAG_LEN] != Self::key_tag(key_id) {
            return Err(Error::key_service(
                "decrypt",
                format!("ciphertext was not produced under key {}", key_id),
            ));
        }
        Ok(Bytes::from(Self::apply_keystream(
            key_id,
            &ciphertext[TAG_LEN..],
        )))
    }
}
