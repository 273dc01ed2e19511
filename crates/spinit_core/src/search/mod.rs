//! Filtering and substring search over tasks and notes.
//!
//! Everything here is a pure function of the full collection; nothing is
//! cached between calls.

pub mod filter;
