//! Domain model for the activity tracker.
//!
//! # Responsibility
//! - Define the activity record, its identifier source and the static
//!   category reference list.
//!
//! # Invariants
//! - Every activity is identified by a stable `ActivityId`.
//! - Category data is read-only for the whole session.

pub mod activity;
pub mod category;
pub mod id;
