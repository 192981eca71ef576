//! Owned single-writer activity store.
//!
//! # Responsibility
//! - Own the session's `ActivityState` and apply actions through `reduce`.
//! - Keep the edit selection pointing at a committed activity.
//! - Emit metadata-only dispatch diagnostics.
//!
//! # Invariants
//! - State only changes through `dispatch`.
//! - Selecting an id that is not committed is ignored.
//! - Deleting the selected activity also clears the selection.
//! - A save never commits a second activity with an already committed id.

use crate::model::activity::{Activity, ActivityId};
use crate::store::reducer::{reduce, ActionDecodeError, ActivityAction, ActivityState};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejections of a seed state passed to [`ActivityStore::with_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Two seeded activities share this id.
    DuplicateId(ActivityId),
    /// The seeded selection names no seeded activity.
    UnknownActiveId(ActivityId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate activity id: {id}"),
            Self::UnknownActiveId(id) => write!(f, "selected activity not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Result of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action went through the reducer.
    Applied,
    /// The action was dropped and the state is unchanged.
    Ignored,
}

/// In-memory store for one tracker session.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    state: ActivityState,
}

impl ActivityStore {
    /// Creates an empty store: no activities, no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with an existing state.
    ///
    /// # Errors
    /// - `DuplicateId` when two activities share an id.
    /// - `UnknownActiveId` when the selection names no seeded activity.
    pub fn with_state(state: ActivityState) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(state.activities.len());
        for activity in &state.activities {
            if !seen.insert(activity.id) {
                return Err(StoreError::DuplicateId(activity.id));
            }
        }
        if let Some(active_id) = state.active_id {
            if !seen.contains(&active_id) {
                return Err(StoreError::UnknownActiveId(active_id));
            }
        }
        Ok(Self { state })
    }

    pub fn state(&self) -> &ActivityState {
        &self.state
    }

    pub fn activities(&self) -> &[Activity] {
        &self.state.activities
    }

    pub fn active_id(&self) -> Option<ActivityId> {
        self.state.active_id
    }

    pub fn find(&self, id: ActivityId) -> Option<&Activity> {
        self.state.find(id)
    }

    /// Applies one action.
    ///
    /// # Contract
    /// - `SetActiveId(Some(id))` for an id not in the list returns `Ignored`.
    /// - `DeleteActivity` of the selected id clears the selection as well.
    /// - `SaveActivity` of a committed id with no selection replaces that
    ///   activity in place; while another activity is selected it returns
    ///   `Ignored`.
    /// - Every other action is passed to `reduce` unchanged.
    pub fn dispatch(&mut self, action: ActivityAction) -> DispatchOutcome {
        if let ActivityAction::SetActiveId { id: Some(id) } = &action {
            if self.state.find(*id).is_none() {
                warn!(
                    "event=dispatch module=store status=ignored action={} reason=unknown_id id={}",
                    action.name(),
                    id
                );
                return DispatchOutcome::Ignored;
            }
        }

        let mut current = None;
        if let ActivityAction::SaveActivity { new_activity } = &action {
            let committed = self.state.find(new_activity.id).is_some();
            match self.state.active_id {
                Some(active_id) if committed && active_id != new_activity.id => {
                    warn!(
                        "event=dispatch module=store status=ignored action={} reason=duplicate_id id={}",
                        action.name(),
                        new_activity.id
                    );
                    return DispatchOutcome::Ignored;
                }
                // Saving a committed id without a selection updates it in place.
                None if committed => {
                    current = Some(reduce(
                        &self.state,
                        &ActivityAction::SetActiveId {
                            id: Some(new_activity.id),
                        },
                    ));
                }
                _ => {}
            }
        }

        let mut next = reduce(current.as_ref().unwrap_or(&self.state), &action);
        if let ActivityAction::DeleteActivity { id } = &action {
            if next.active_id == Some(*id) {
                next = reduce(&next, &ActivityAction::SetActiveId { id: None });
            }
        }
        self.state = next;

        debug!(
            "event=dispatch module=store status=ok action={} activities={} editing={}",
            action.name(),
            self.state.activities.len(),
            self.state.active_id.is_some()
        );
        DispatchOutcome::Applied
    }

    /// Decodes and applies one action envelope.
    ///
    /// Envelopes with an unrecognized `type` leave the state unchanged and
    /// return `Ignored`.
    pub fn dispatch_envelope(&mut self, raw: &str) -> Result<DispatchOutcome, ActionDecodeError> {
        match ActivityAction::decode(raw)? {
            Some(action) => Ok(self.dispatch(action)),
            None => {
                debug!("event=dispatch module=store status=ignored reason=unknown_action");
                Ok(DispatchOutcome::Ignored)
            }
        }
    }
}
