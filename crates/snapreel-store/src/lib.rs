//! JSON-file planner store.
//!
//! The content calendar is a single JSON array in one file: read once at
//! startup, rewritten atomically on every mutation. There is exactly one
//! writer (the API process), so a whole-file rewrite is the durability model,
//! not a limitation.

pub mod error;
pub mod planner;

pub use error::{StoreError, StoreResult};
pub use planner::PlannerStore;
