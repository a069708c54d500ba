//! Snapshot persistence
//!
//! Durable load/save of whole-store snapshots against a key-value facility.
//! Loads never fail; saves report failures for the caller to log.

mod backend;
mod snapshot_store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot_store::SnapshotStore;
