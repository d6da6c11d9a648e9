//! Pure domain logic for the boardsight analytics backend.
//!
//! Everything in this crate is a synchronous function of its inputs: the
//! warehouse adapter fetches row sets, the metrics engine here derives the
//! dashboard's numbers from them, and the API layer serializes the result.
//! No I/O, no shared mutable state, no styling or configuration access.

pub mod metrics;
pub mod observation;
pub mod types;
