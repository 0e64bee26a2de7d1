//! Local-first mission list.
//!
//! A [`store::MissionStore`] owns the ordered list of missions and applies
//! commands to it. After every applied command the new snapshot is handed to a
//! [`gateway::PersistenceGateway`], which mirrors it into a durable key-value
//! slot ([`db::KeyValueStore`]). The [`session::Session`] layers transient UI
//! state (draft and edit buffers) on top of the store.

pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod models;
pub mod render;
pub mod session;
pub mod shell;
pub mod store;

pub use error::{ErrorKind, StorageError};
pub use gateway::{KvGateway, PersistenceGateway, STORAGE_KEY};
pub use models::{EditBuffer, Mission, MissionId};
pub use session::Session;
pub use store::{MissionStore, Snapshot};
