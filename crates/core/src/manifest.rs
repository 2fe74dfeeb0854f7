//! Manifest and mission values.
//!
//! A manifest maps mission identifiers to location records. Entries are kept
//! as raw JSON; only the entry for the current mission is ever read as a
//! [`LocationRecord`], so unrelated entries may have any shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Where a mission's objective is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub planet: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl LocationRecord {
    pub fn new(planet: impl Into<String>) -> Self {
        LocationRecord {
            planet: planet.into(),
            details: Map::new(),
        }
    }
}

impl From<LocationRecord> for Value {
    fn from(record: LocationRecord) -> Self {
        let mut object = record.details;
        object.insert("planet".to_string(), Value::String(record.planet));
        Value::Object(object)
    }
}

/// Mission identifier to location record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(BTreeMap<String, Value>);

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from dropped or decrypted bytes. The body must be a
    /// JSON object; its values are not inspected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|err| Error::MalformedInput(format!("manifest is malformed: {}", err)))
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn insert(&mut self, mission: impl Into<String>, entry: impl Into<Value>) {
        self.0.insert(mission.into(), entry.into());
    }

    /// Raw entry for `mission`.
    pub fn get(&self, mission: &Mission) -> Option<&Value> {
        self.0.get(mission.as_str())
    }

    /// Location for `mission`, if the manifest lists it. Fails when the
    /// entry exists but carries no string `planet`.
    pub fn locate(&self, mission: &Mission) -> Result<Option<LocationRecord>> {
        self.get(mission)
            .map(|entry| {
                serde_json::from_value(entry.clone()).map_err(|err| {
                    Error::MalformedInput(format!(
                        "manifest entry for the current mission has no usable planet: {}",
                        err
                    ))
                })
            })
            .transpose()
    }

    pub fn contains(&self, mission: &Mission) -> bool {
        self.0.contains_key(mission.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold `newer` into this manifest. Entries from `newer` replace
    /// existing entries with the same mission; all other entries are kept.
    pub fn merge(mut self, newer: Manifest) -> Manifest {
        self.0.extend(newer.0);
        self
    }
}

impl FromIterator<(String, LocationRecord)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, LocationRecord)>>(iter: I) -> Self {
        Manifest(
            iter.into_iter()
                .map(|(mission, record)| (mission, Value::from(record)))
                .collect(),
        )
    }
}

/// The currently active objective.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mission(String);

impl Mission {
    /// Mission from a dropped file body; surrounding whitespace is dropped.
    pub fn from_drop(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| Error::MalformedInput(format!("mission is not UTF-8: {}", err)))?;
        Ok(Mission(text.trim().to_string()))
    }

    /// Mission from decrypted secret bytes, taken verbatim.
    pub fn from_secret(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec())
            .map(Mission)
            .map_err(|err| Error::MalformedInput(format!("stored mission is not UTF-8: {}", err)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Mission {
    fn from(value: &str) -> Self {
        Mission(value.to_string())
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
