//! Encrypted-at-rest secret slots.
//!
//! Each slot is a single object in the secret bucket whose body is the key
//! service ciphertext of the slot's plaintext.

use bytes::Bytes;
use tracing::debug;

use crate::error::Result;
use crate::manifest::{Manifest, Mission};
use crate::ports::{KeyService, ObjectStore, Presence};

/// The two pieces of durable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSlot {
    Mission,
    Manifest,
}

impl SecretSlot {
    /// Object key the slot is stored under.
    pub fn key(self) -> &'static str {
        match self {
            SecretSlot::Mission => "mission",
            SecretSlot::Manifest => "manifest",
        }
    }
}

/// Reads and writes secret slots through the object store and key service.
pub struct SecretVault<'a, S, K> {
    store: &'a S,
    keys: &'a K,
    bucket: &'a str,
    key_id: &'a str,
}

impl<'a, S, K> SecretVault<'a, S, K>
where
    S: ObjectStore,
    K: KeyService,
{
    pub fn new(store: &'a S, keys: &'a K, bucket: &'a str, key_id: &'a str) -> Self {
        Self {
            store,
            keys,
            bucket,
            key_id,
        }
    }

    pub async fn presence(&self, slot: SecretSlot) -> Result<Presence> {
        self.store.head(self.bucket, slot.key()).await
    }

    /// Encrypt `plaintext` and overwrite the slot with it.
    pub async fn save(&self, slot: SecretSlot, plaintext: Bytes) -> Result<()> {
        let ciphertext = self.keys.encrypt(self.key_id, plaintext).await?;
        self.store.put(self.bucket, slot.key(), ciphertext).await?;
        debug!(bucket = self.bucket, key = slot.key(), "Secret stored");
        Ok(())
    }

    /// Fetch and decrypt the slot. The slot must exist.
    pub async fn load(&self, slot: SecretSlot) -> Result<Bytes> {
        let ciphertext = self.store.get(self.bucket, slot.key()).await?;
        self.keys.decrypt(self.key_id, ciphertext).await
    }

    pub async fn save_manifest(&self, manifest: &Manifest) -> Result<()> {
        self.save(SecretSlot::Manifest, Bytes::from(manifest.to_vec()?))
            .await
    }

    pub async fn load_manifest(&self) -> Result<Manifest> {
        Manifest::from_slice(&self.load(SecretSlot::Manifest).await?)
    }

    pub async fn save_mission(&self, mission: &Mission) -> Result<()> {
        self.save(
            SecretSlot::Mission,
            Bytes::copy_from_slice(mission.as_str().as_bytes()),
        )
        .await
    }

    pub async fn load_mission(&self) -> Result<Mission> {
        Mission::from_secret(&self.load(SecretSlot::Mission).await?)
    }
}
