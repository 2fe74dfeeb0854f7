//! Core of the Jedi drop handler.
//!
//! Missions and manifests dropped into an inbound bucket are kept encrypted
//! in a secret bucket; once the current mission appears in the manifest the
//! handler reports the planet it points to.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod logging;
pub mod manifest;
pub mod memory;
pub mod ports;
pub mod vault;

pub use config::DropConfig;
pub use error::{Error, Result};
pub use event::{DropKind, DropObject, StorageEvent};
pub use handler::{DropHandler, DropResponse, PlanetBody};
pub use manifest::{LocationRecord, Manifest, Mission};
pub use memory::{InMemoryKeyService, InMemoryObjectStore};
pub use ports::{KeyService, ObjectStore, Presence};
pub use vault::{SecretSlot, SecretVault};
