//! Domain records persisted by the store.
//!
//! # Invariants
//! - Every task and note carries a uuid that is unique within its collection.
//! - Records serialize to the JSON shape kept under the store keys.

pub mod note;
pub mod stats;
pub mod task;
