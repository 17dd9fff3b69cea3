//! Display-only derived state.
//!
//! # Responsibility
//! - Track ephemeral celebration markers.
//! - Compute list summaries on demand.
//!
//! # Invariants
//! - Nothing here is persisted.

pub mod celebration;
pub mod summary;
