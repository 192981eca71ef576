//! Core state logic for the calorie tracker.
//! This crate owns the activity store, the draft editor and their invariants.

pub mod editor;
pub mod logging;
pub mod model;
pub mod store;
pub mod summary;

pub use editor::draft_editor::{
    DraftEditor, EditorPhase, SubmitError, SUBMIT_LABEL_FOOD, SUBMIT_LABEL_WORKOUT,
};
pub use editor::field::{decode_field, FieldDecodeError, FieldValue, FormField};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::activity::{is_valid_activity, Activity, ActivityId, ActivityValidationError};
pub use model::category::{
    categories, category_name, find_category, Category, CategoryId, EXERCISE_CATEGORY_ID,
    PRIMARY_CATEGORY_ID,
};
pub use model::id::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use store::activity_store::{ActivityStore, DispatchOutcome, StoreError};
pub use store::reducer::{reduce, ActionDecodeError, ActivityAction, ActivityState};
pub use summary::CalorieSummary;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
