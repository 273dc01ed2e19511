//! In-memory repositories synced to the key-value store.
//!
//! # Responsibility
//! - Own the ordered task/note collections and the focus-session aggregates.
//! - Persist the whole collection immediately after every mutation.
//!
//! # Invariants
//! - After a mutating call returns `Ok`, memory and store hold equal data.
//! - Lookups by a missing id are silent no-ops, never errors.

pub mod note_repo;
pub mod session_repo;
pub mod task_repo;
