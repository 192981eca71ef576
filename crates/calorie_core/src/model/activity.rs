//! Activity domain model.
//!
//! # Responsibility
//! - Define the canonical food/exercise record kept by the store.
//! - Provide the validity predicate that gates draft submission.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes afterwards.
//! - A valid activity has a trimmed-non-empty `name` and `calories > 0`.

use crate::model::category::{CategoryId, PRIMARY_CATEGORY_ID};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one recorded activity.
pub type ActivityId = Uuid;

/// Validation errors for activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityValidationError {
    /// `name` is empty after trimming.
    EmptyName,
    /// `calories` is zero or negative.
    NonPositiveCalories(i64),
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "activity name must not be blank"),
            Self::NonPositiveCalories(value) => {
                write!(f, "calories must be greater than zero, got {value}")
            }
        }
    }
}

impl Error for ActivityValidationError {}

/// One recorded food or exercise entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    /// Reference category id; `1` is the food bucket.
    pub category: CategoryId,
    /// Free-text label, stored exactly as typed.
    pub name: String,
    pub calories: i64,
}

impl Activity {
    /// Creates a blank record: primary category, empty name, zero calories.
    ///
    /// The result is intentionally invalid until the user fills it in.
    pub fn blank(id: ActivityId) -> Self {
        Self {
            id,
            category: PRIMARY_CATEGORY_ID,
            name: String::new(),
            calories: 0,
        }
    }

    /// Creates a record with every field provided by the caller.
    pub fn new(
        id: ActivityId,
        category: CategoryId,
        name: impl Into<String>,
        calories: i64,
    ) -> Self {
        Self {
            id,
            category,
            name: name.into(),
            calories,
        }
    }

    /// Checks the submission invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `name.trim()` is empty (checked first).
    /// - `NonPositiveCalories` when `calories <= 0`.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        if self.name.trim().is_empty() {
            return Err(ActivityValidationError::EmptyName);
        }
        if self.calories <= 0 {
            return Err(ActivityValidationError::NonPositiveCalories(self.calories));
        }
        Ok(())
    }

    /// Returns whether this activity counts toward intake rather than burn.
    pub fn is_intake(&self) -> bool {
        self.category == PRIMARY_CATEGORY_ID
    }
}

/// Boolean form of [`Activity::validate`] used to enable the submit action.
pub fn is_valid_activity(activity: &Activity) -> bool {
    activity.validate().is_ok()
}
