//! Activity identifier generation.
//!
//! # Responsibility
//! - Produce session-unique identifiers for new drafts.
//! - Let tests swap in a deterministic generator.

use crate::model::activity::ActivityId;
use uuid::Uuid;

/// Source of fresh activity identifiers.
///
/// # Invariants
/// - Every call returns an id not returned before within the session.
pub trait IdGenerator {
    fn next_id(&mut self) -> ActivityId;
}

/// Default generator backed by random UUID v4 values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ActivityId {
        Uuid::new_v4()
    }
}

/// Counter-based generator yielding `00000000-...-0001`, `...-0002`, ...
///
/// Useful for reproducible scripted sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct SequentialGenerator {
    next: u128,
}

impl SequentialGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&mut self) -> ActivityId {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}
