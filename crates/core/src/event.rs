//! Object-created notifications and drop classification.
//!
//! Only the fields the handler reads are modelled; everything else in the
//! notification is ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Object key a manifest is dropped under.
pub const MANIFEST_KEY: &str = "manifest";
/// Object key a mission is dropped under.
pub const MISSION_KEY: &str = "mission";

/// Storage notification as delivered to the function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageEventRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEventRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// Location of the object that triggered an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropObject {
    pub bucket: String,
    pub key: String,
}

impl StorageEvent {
    /// Build a single-record notification.
    pub fn object_created(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        StorageEvent {
            records: vec![StorageEventRecord {
                s3: StorageEntity {
                    bucket: BucketRef { name: bucket.into() },
                    object: ObjectRef { key: key.into() },
                },
            }],
        }
    }

    /// The dropped object described by the first record.
    pub fn drop_object(&self) -> Result<DropObject> {
        let record = self
            .records
            .first()
            .ok_or_else(|| Error::MalformedInput("notification carries no records".into()))?;

        if self.records.len() > 1 {
            tracing::warn!(
                records = self.records.len(),
                "Notification carries several records, only the first is handled"
            );
        }

        Ok(DropObject {
            bucket: record.s3.bucket.name.clone(),
            key: record.s3.object.key.clone(),
        })
    }
}

/// What a dropped file is, decided by its key alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropKind {
    Manifest,
    Mission,
    Unrecognized(String),
}

impl DropKind {
    pub fn classify(key: &str) -> Self {
        match key {
            MANIFEST_KEY => DropKind::Manifest,
            MISSION_KEY => DropKind::Mission,
            other => DropKind::Unrecognized(other.to_string()),
        }
    }
}
