//! Stockflow - cross-stage warehouse workflow core
//!
//! Tracks one purchase request and SKU through purchasing, production,
//! arrival inspection, inbound registration, quality control, shipment and
//! inventory, with a side branch for rejected orders. This library provides:
//! - Schema definitions for every stage record and the configuration
//! - Domain logic for status progressions, input validation, packaging
//!   derivations and stage-to-stage promotion
//! - Insertion-ordered entity stores keyed by record id, deduplicated by
//!   purchase request number and SKU
//! - A transition coordinator that authorizes, promotes and rejects
//! - Snapshot persistence over a pluggable key-value backend

pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod schemas;
pub mod snapshot;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use errors::{Result, StockflowError};
pub use schemas::{Config, Record, RejectedOrder, Stage};
pub use snapshot::{FileStore, KeyValueStore, MemoryStore};
pub use store::WarehouseState;
pub use workflow::{Capability, Coordinator, PromotionOutcome, Role, SharedCoordinator};
