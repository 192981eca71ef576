//! Draft editor state machine.
//!
//! # Responsibility
//! - Own the single in-progress activity (the draft).
//! - Load the draft from the store when a new selection is observed.
//! - Gate submission on validity and reset after every successful submit.
//!
//! # Invariants
//! - `Fresh` drafts carry a newly generated id not present in the store.
//! - `Editing` drafts were copied wholesale from a committed activity.
//! - An invalid submit changes neither the store nor the draft.

use crate::editor::field::{decode_field, FieldDecodeError, FieldValue, FormField};
use crate::model::activity::{is_valid_activity, Activity, ActivityId, ActivityValidationError};
use crate::model::category::find_category;
use crate::model::id::IdGenerator;
use crate::store::activity_store::{ActivityStore, DispatchOutcome};
use crate::store::reducer::{ActivityAction, ActivityState};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Submit label shown while the draft is in the primary (food) category.
pub const SUBMIT_LABEL_FOOD: &str = "Save Food";
/// Submit label shown for every other category.
pub const SUBMIT_LABEL_WORKOUT: &str = "Save Workout";

/// Editor lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Fresh,
    Editing,
}

/// Submission failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    InvalidDraft(ActivityValidationError),
    /// The store would have committed a second activity with this id.
    Rejected(ActivityId),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDraft(err) => write!(f, "cannot save draft: {err}"),
            Self::Rejected(id) => write!(f, "store rejected draft {id}: id already committed"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDraft(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

/// Form-side editor over one draft activity.
pub struct DraftEditor<G: IdGenerator> {
    generator: G,
    draft: Activity,
    phase: EditorPhase,
    observed_active_id: Option<ActivityId>,
}

impl<G: IdGenerator> DraftEditor<G> {
    /// Creates an editor holding a fresh blank draft.
    pub fn new(mut generator: G) -> Self {
        let draft = Activity::blank(generator.next_id());
        Self {
            generator,
            draft,
            phase: EditorPhase::Fresh,
            observed_active_id: None,
        }
    }

    pub fn draft(&self) -> &Activity {
        &self.draft
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Synchronizes with the store selection.
    ///
    /// # Contract
    /// - An `Editing` draft whose activity is no longer committed resets to a
    ///   fresh draft.
    /// - Otherwise acts only when `state.active_id` differs from the last
    ///   observed one.
    /// - A new `Some(id)` overwrites the whole draft with the committed
    ///   activity and enters `Editing`.
    /// - A selected id with no committed activity resets to a fresh draft.
    /// - A change to `None` ends an `Editing` session with a fresh draft.
    pub fn observe(&mut self, state: &ActivityState) {
        if self.phase == EditorPhase::Editing && state.find(self.draft.id).is_none() {
            debug!(
                "event=draft_reset module=editor status=ok reason=activity_removed id={}",
                self.draft.id
            );
            self.reset();
        }
        if state.active_id == self.observed_active_id {
            return;
        }
        self.observed_active_id = state.active_id;

        let Some(active_id) = state.active_id else {
            if self.phase == EditorPhase::Editing {
                debug!("event=draft_reset module=editor status=ok reason=selection_cleared");
                self.reset();
            }
            return;
        };
        match state.find(active_id) {
            Some(activity) => {
                self.draft = activity.clone();
                self.phase = EditorPhase::Editing;
                debug!(
                    "event=draft_load module=editor status=ok id={}",
                    activity.id
                );
            }
            None => {
                warn!(
                    "event=draft_load module=editor status=fallback reason=missing_activity id={}",
                    active_id
                );
                self.reset();
            }
        }
    }

    /// Decodes `raw` and writes exactly one draft field.
    ///
    /// The draft is untouched when decoding fails.
    pub fn update_field(&mut self, field: FormField, raw: &str) -> Result<(), FieldDecodeError> {
        match decode_field(field, raw)? {
            FieldValue::Category(category) => self.draft.category = category,
            FieldValue::Name(name) => self.draft.name = name,
            FieldValue::Calories(calories) => self.draft.calories = calories,
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        is_valid_activity(&self.draft)
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        self.is_valid()
    }

    /// Saves the draft into `store` and starts a fresh draft.
    ///
    /// Returns the id of the saved activity.
    ///
    /// # Errors
    /// - `InvalidDraft` when the draft fails validation; nothing changes.
    /// - `Rejected` when the store refuses the save; the draft is kept.
    pub fn submit(&mut self, store: &mut ActivityStore) -> Result<ActivityId, SubmitError> {
        self.draft.validate().map_err(SubmitError::InvalidDraft)?;

        let saved_id = self.draft.id;
        let phase = self.phase;
        let outcome = store.dispatch(ActivityAction::SaveActivity {
            new_activity: self.draft.clone(),
        });
        if outcome == DispatchOutcome::Ignored {
            return Err(SubmitError::Rejected(saved_id));
        }
        self.observed_active_id = store.active_id();
        self.reset();

        debug!(
            "event=draft_submit module=editor status=ok id={} mode={}",
            saved_id,
            match phase {
                EditorPhase::Fresh => "create",
                EditorPhase::Editing => "update",
            }
        );
        Ok(saved_id)
    }

    /// Submit label for the draft's current category.
    pub fn submit_label(&self) -> &'static str {
        match find_category(self.draft.category) {
            Some(category) if category.is_primary() => SUBMIT_LABEL_FOOD,
            _ => SUBMIT_LABEL_WORKOUT,
        }
    }

    fn reset(&mut self) {
        self.draft = Activity::blank(self.generator.next_id());
        self.phase = EditorPhase::Fresh;
    }
}
