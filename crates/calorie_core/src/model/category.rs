//! Static category reference data.
//!
//! # Responsibility
//! - Provide the ordered, read-only list of activity categories.
//! - Identify the primary (food) bucket used for intake totals and labels.
//!
//! # Invariants
//! - Category ids are unique and the list order is stable.
//! - `PRIMARY_CATEGORY_ID` is always present in the list.

use serde::Serialize;

/// Integer identifier of one reference category.
pub type CategoryId = u32;

/// Category id of the primary (food) bucket.
pub const PRIMARY_CATEGORY_ID: CategoryId = 1;

/// Category id of the exercise bucket.
pub const EXERCISE_CATEGORY_ID: CategoryId = 2;

/// One entry of the category reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
}

impl Category {
    /// Returns whether this is the primary (food) bucket.
    pub fn is_primary(&self) -> bool {
        self.id == PRIMARY_CATEGORY_ID
    }
}

const CATEGORIES: &[Category] = &[
    Category {
        id: PRIMARY_CATEGORY_ID,
        name: "Food",
    },
    Category {
        id: EXERCISE_CATEGORY_ID,
        name: "Exercise",
    },
];

/// Returns the ordered category reference list.
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

/// Looks up one category by id.
pub fn find_category(id: CategoryId) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}

/// Display name for `id`, or `"Unknown"` when the id is not in the list.
pub fn category_name(id: CategoryId) -> &'static str {
    find_category(id).map_or("Unknown", |category| category.name)
}
