//! Drop event handler.
//!
//! One invocation reads the dropped object, folds it into the encrypted
//! mission/manifest state, tries to resolve the current objective and then
//! empties the drop bucket. The sweep runs after the branch completes; a
//! failing branch propagates its error and leaves the bucket as it was.
//!
//! Secret slots are read-modify-write with no locking or conditional writes.
//! Two invocations running at once can lose a manifest merge or interleave a
//! mission update.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DropConfig;
use crate::error::Result;
use crate::event::{DropKind, StorageEvent};
use crate::manifest::{Manifest, Mission};
use crate::ports::{KeyService, ObjectStore, Presence};
use crate::vault::{SecretSlot, SecretVault};

/// Status code reported with a resolved objective.
pub const STATUS_OK: u16 = 200;

/// Payload returned when the current mission resolves to a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: PlanetBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetBody {
    #[serde(rename = "Planet")]
    pub planet: String,
}

impl DropResponse {
    pub fn located(planet: impl Into<String>) -> Self {
        DropResponse {
            status_code: STATUS_OK,
            body: PlanetBody {
                planet: planet.into(),
            },
        }
    }
}

/// Handler context: collaborators plus configuration, built once per
/// process and reused for every invocation.
pub struct DropHandler<S, K> {
    store: S,
    keys: K,
    config: DropConfig,
}

impl<S, K> DropHandler<S, K>
where
    S: ObjectStore,
    K: KeyService,
{
    pub fn new(store: S, keys: K, config: DropConfig) -> Self {
        Self {
            store,
            keys,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn vault(&self) -> SecretVault<'_, S, K> {
        SecretVault::new(
            &self.store,
            &self.keys,
            &self.config.secret_bucket,
            &self.config.key_id,
        )
    }

    /// Handle one object-created notification.
    ///
    /// Returns `Some` only when the stored mission is found in the stored
    /// manifest.
    pub async fn handle(&self, event: &StorageEvent) -> Result<Option<DropResponse>> {
        let dropped = event.drop_object()?;

        if let Some(expected) = self.config.drop_bucket.as_deref() {
            if expected != dropped.bucket {
                warn!(
                    expected,
                    bucket = %dropped.bucket,
                    "Event arrived from an unexpected drop bucket"
                );
            }
        }

        let body = self.store.get(&dropped.bucket, &dropped.key).await?;

        let response = match DropKind::classify(&dropped.key) {
            DropKind::Manifest => self.on_manifest(&body).await?,
            DropKind::Mission => self.on_mission(&body).await?,
            DropKind::Unrecognized(key) => {
                info!(%key, "File not recognized");
                None
            }
        };

        self.sweep(&dropped.bucket).await?;
        Ok(response)
    }

    async fn on_manifest(&self, body: &Bytes) -> Result<Option<DropResponse>> {
        let incoming = Manifest::from_slice(body)?;
        let vault = self.vault();

        if !vault.presence(SecretSlot::Mission).await?.is_found() {
            info!("Received a manifest but we don't have a mission");
            vault.save_manifest(&incoming).await?;
            return Ok(None);
        }

        let manifest = match vault.presence(SecretSlot::Manifest).await? {
            Presence::Found => vault.load_manifest().await?.merge(incoming),
            Presence::NotFound => incoming,
        };
        vault.save_manifest(&manifest).await?;

        let mission = vault.load_mission().await?;
        resolve(&mission, &manifest)
    }

    async fn on_mission(&self, body: &Bytes) -> Result<Option<DropResponse>> {
        let mission = Mission::from_drop(body)?;
        let vault = self.vault();
        vault.save_mission(&mission).await?;

        if !vault.presence(SecretSlot::Manifest).await?.is_found() {
            info!("Received a mission but we don't have a manifest");
            return Ok(None);
        }

        let manifest = vault.load_manifest().await?;
        resolve(&mission, &manifest)
    }

    /// Delete every object in `bucket`, returning how many were removed.
    pub async fn sweep(&self, bucket: &str) -> Result<usize> {
        let keys = self.store.list(bucket).await?;
        for key in &keys {
            self.store.delete(bucket, key).await?;
        }
        info!(bucket, removed = keys.len(), "Drop bucket cleaned");
        Ok(keys.len())
    }
}

/// Only the current mission's entry is read; a matched entry without a
/// string `planet` fails the invocation.
fn resolve(mission: &Mission, manifest: &Manifest) -> Result<Option<DropResponse>> {
    match manifest.locate(mission)? {
        Some(record) => {
            info!(planet = %record.planet, "Our current objective is located in {}", record.planet);
            Ok(Some(DropResponse::located(record.planet)))
        }
        None => {
            info!("Current objective not found in manifest");
            Ok(None)
        }
    }
}
