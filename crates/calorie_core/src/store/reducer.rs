//! Pure activity state transitions.
//!
//! # Responsibility
//! - Define the store state and the closed set of actions over it.
//! - Compute the next state for one action without side effects.
//! - Decode actions from their tagged JSON envelope form.
//!
//! # Invariants
//! - `reduce` never mutates its input and never fails.
//! - Saving always ends the editing session (`active_id = None`).
//! - Deleting never touches `active_id`.
//! - An envelope with an unrecognized `type` decodes to no action at all.

use crate::model::activity::{Activity, ActivityId};
use crate::summary::CalorieSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Envelope tag of [`ActivityAction::SaveActivity`].
pub const ACTION_SAVE_ACTIVITY: &str = "save-activity";
/// Envelope tag of [`ActivityAction::SetActiveId`].
pub const ACTION_SET_ACTIVE_ID: &str = "set-activityId";
/// Envelope tag of [`ActivityAction::DeleteActivity`].
pub const ACTION_DELETE_ACTIVITY: &str = "delete-activity";

const KNOWN_ACTION_TYPES: &[&str] = &[
    ACTION_SAVE_ACTIVITY,
    ACTION_SET_ACTIVE_ID,
    ACTION_DELETE_ACTIVITY,
];

/// Committed activities plus the current edit selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityState {
    /// Insertion-ordered, unique by `id`.
    pub activities: Vec<Activity>,
    /// `None` while creating; `Some(id)` while editing that activity.
    #[serde(rename = "activeId")]
    pub active_id: Option<ActivityId>,
}

impl ActivityState {
    /// Finds one committed activity by id.
    pub fn find(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    /// Returns the list position of `id`, if present.
    pub fn position(&self, id: ActivityId) -> Option<usize> {
        self.activities.iter().position(|activity| activity.id == id)
    }

    /// Derived calorie totals over the current list.
    pub fn summary(&self) -> CalorieSummary {
        CalorieSummary::from_activities(&self.activities)
    }
}

/// Closed set of store actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ActivityAction {
    /// Appends, or replaces the activity selected by `active_id`.
    #[serde(rename = "save-activity")]
    SaveActivity {
        #[serde(rename = "newActivity")]
        new_activity: Activity,
    },
    /// Selects an activity for editing; `None` clears the selection.
    #[serde(rename = "set-activityId")]
    SetActiveId { id: Option<ActivityId> },
    /// Removes the activity with the given id, if present.
    #[serde(rename = "delete-activity")]
    DeleteActivity { id: ActivityId },
}

impl ActivityAction {
    /// Stable envelope tag, also used as the log field value.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SaveActivity { .. } => ACTION_SAVE_ACTIVITY,
            Self::SetActiveId { .. } => ACTION_SET_ACTIVE_ID,
            Self::DeleteActivity { .. } => ACTION_DELETE_ACTIVITY,
        }
    }

    /// Decodes one action from its `{"type": .., "payload": ..}` envelope.
    ///
    /// Returns `Ok(None)` for a well-formed envelope whose `type` is not one
    /// of the known actions. For `set-activityId`, an empty-string id means
    /// "no selection".
    ///
    /// # Errors
    /// - `Malformed` when the input is not a JSON object with a string `type`.
    /// - `InvalidPayload` when a known action carries an unusable payload.
    pub fn decode(raw: &str) -> Result<Option<Self>, ActionDecodeError> {
        let mut envelope: Value = serde_json::from_str(raw)
            .map_err(|err| ActionDecodeError::Malformed(err.to_string()))?;

        let kind = envelope
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ActionDecodeError::Malformed("missing string `type`".to_string()))?
            .to_string();
        if !KNOWN_ACTION_TYPES.contains(&kind.as_str()) {
            return Ok(None);
        }

        if kind == ACTION_SET_ACTIVE_ID {
            if let Some(id) = envelope.pointer_mut("/payload/id") {
                if id.as_str() == Some("") {
                    *id = Value::Null;
                }
            }
        }

        serde_json::from_value(envelope)
            .map(Some)
            .map_err(|err| ActionDecodeError::InvalidPayload {
                action: kind,
                message: err.to_string(),
            })
    }
}

/// Errors raised while decoding an action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDecodeError {
    Malformed(String),
    InvalidPayload { action: String, message: String },
}

impl Display for ActionDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed action envelope: {message}"),
            Self::InvalidPayload { action, message } => {
                write!(f, "invalid payload for `{action}`: {message}")
            }
        }
    }
}

impl Error for ActionDecodeError {}

/// Computes the state that follows `action`.
pub fn reduce(state: &ActivityState, action: &ActivityAction) -> ActivityState {
    match action {
        ActivityAction::SaveActivity { new_activity } => {
            let activities = match state.active_id {
                Some(active_id) => state
                    .activities
                    .iter()
                    .map(|activity| {
                        if activity.id == active_id {
                            new_activity.clone()
                        } else {
                            activity.clone()
                        }
                    })
                    .collect(),
                None => {
                    let mut activities = Vec::with_capacity(state.activities.len() + 1);
                    activities.extend(state.activities.iter().cloned());
                    activities.push(new_activity.clone());
                    activities
                }
            };
            ActivityState {
                activities,
                active_id: None,
            }
        }
        ActivityAction::SetActiveId { id } => ActivityState {
            activities: state.activities.clone(),
            active_id: *id,
        },
        ActivityAction::DeleteActivity { id } => ActivityState {
            activities: state
                .activities
                .iter()
                .filter(|activity| activity.id != *id)
                .cloned()
                .collect(),
            active_id: state.active_id,
        },
    }
}
