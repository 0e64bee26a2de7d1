//! Persistence gateway between the mission store and durable storage.

use std::collections::HashSet;

use crate::db::KeyValueStore;
use crate::error::StorageError;
use crate::models::{is_valid_title, Mission};

/// Storage key holding the serialized mission list.
pub const STORAGE_KEY: &str = "missions-v1";

/// Mirrors mission snapshots into durable storage and reads them back.
///
/// The store calls [`save`](Self::save) after every applied command and
/// [`load`](Self::load) once at startup.
pub trait PersistenceGateway {
    fn load(&self) -> Result<Vec<Mission>, StorageError>;

    fn save(&self, missions: &[Mission]) -> Result<(), StorageError>;
}

/// Stores the mission list as a JSON array under [`STORAGE_KEY`].
pub struct KvGateway<S> {
    kv: S,
}

impl<S: KeyValueStore> KvGateway<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }
}

impl<S: KeyValueStore> PersistenceGateway for KvGateway<S> {
    fn load(&self) -> Result<Vec<Mission>, StorageError> {
        let raw = self.kv.get(STORAGE_KEY)?.ok_or_else(|| StorageError::Missing {
            key: STORAGE_KEY.to_string(),
        })?;

        let records: Vec<serde_json::Value> =
            serde_json::from_slice(&raw).map_err(|source| StorageError::Deserialization {
                key: STORAGE_KEY.to_string(),
                source,
            })?;

        let missions: Vec<Mission> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(mission) => Some(mission),
                Err(e) => {
                    tracing::warn!("Dropping malformed stored mission at index {}: {}", index, e);
                    None
                }
            })
            .collect();

        Ok(sanitize(missions))
    }

    fn save(&self, missions: &[Mission]) -> Result<(), StorageError> {
        let raw = serde_json::to_vec(missions)?;
        self.kv.set(STORAGE_KEY, &raw)
    }
}

/// Drop records that would break the list invariants: blank titles and
/// repeated ids (the first occurrence wins).
fn sanitize(missions: Vec<Mission>) -> Vec<Mission> {
    let mut seen = HashSet::new();
    missions
        .into_iter()
        .filter(|m| {
            if !is_valid_title(&m.task) {
                tracing::warn!("Dropping stored mission {} with an empty title", m.id);
                return false;
            }
            if !seen.insert(m.id) {
                tracing::warn!("Dropping stored mission with duplicate id {}", m.id);
                return false;
            }
            true
        })
        .collect()
}
