//! Draft editing surface.
//!
//! # Responsibility
//! - Hold the in-progress activity and turn raw input into typed updates.
//! - Submit valid drafts to the store.

pub mod draft_editor;
pub mod field;
