//! Entity stores
//!
//! Pure storage: one insertion-ordered store per stage, no validation.

mod entity_store;
mod state;

pub use entity_store::{InsertOutcome, Store};
pub use state::WarehouseState;
