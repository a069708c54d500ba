//! Transition coordination over the entity stores
//!
//! Authorization, promotion with downstream dedup, append-only rejection,
//! raw-field edits and best-effort snapshot persistence.

mod capability;
mod coordinator;
mod project;
mod shared;


pub use capability::{Capability, Role};
pub use coordinator::{Coordinator, PromotionOutcome};
pub use project::{init_project, open_project};
pub use shared::SharedCoordinator;
