//! Activity store: state, actions and the reducer.
//!
//! # Responsibility
//! - Keep the authoritative list of committed activities.
//! - Track which activity, if any, is selected for editing.
//!
//! # Invariants
//! - No two committed activities share an id.

pub mod activity_store;
pub mod reducer;
