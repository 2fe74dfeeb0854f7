//! Configuration management for the drop handler.

use std::env;

use crate::error::{Error, Result};

/// Environment variable holding the key service key id.
pub const KEY_ID_VAR: &str = "jedi_key";
/// Environment variable holding the expected drop bucket.
pub const DROP_BUCKET_VAR: &str = "jedi_drop";
/// Environment variable holding the secret bucket.
pub const SECRET_BUCKET_VAR: &str = "jedi_secret";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropConfig {
    /// Key id (or ARN) secrets are encrypted under
    pub key_id: String,
    /// Bucket holding the encrypted mission and manifest
    pub secret_bucket: String,
    /// Drop bucket the function is deployed against. Events carry their own
    /// bucket name, which always wins.
    pub drop_bucket: Option<String>,
}

impl DropConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} is not set", name)))
        };

        Ok(DropConfig {
            key_id: required(KEY_ID_VAR)?,
            secret_bucket: required(SECRET_BUCKET_VAR)?,
            drop_bucket: lookup(DROP_BUCKET_VAR).filter(|value| !value.trim().is_empty()),
        })
    }
}
