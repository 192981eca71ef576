//! Derived calorie totals.

use crate::model::activity::Activity;
use serde::Serialize;

/// Intake, burn and net calories over a list of activities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CalorieSummary {
    /// Sum over primary (food) category activities.
    pub consumed: i64,
    /// Sum over every other category.
    pub burned: i64,
    /// `consumed - burned`.
    pub net: i64,
}

impl CalorieSummary {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let (consumed, burned) =
            activities
                .iter()
                .fold((0_i64, 0_i64), |(consumed, burned), activity| {
                    if activity.is_intake() {
                        (consumed.saturating_add(activity.calories), burned)
                    } else {
                        (consumed, burned.saturating_add(activity.calories))
                    }
                });
        Self {
            consumed,
            burned,
            net: consumed.saturating_sub(burned),
        }
    }
}
