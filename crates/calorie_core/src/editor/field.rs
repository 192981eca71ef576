//! Typed decoding of raw form input.
//!
//! # Responsibility
//! - Map one raw text input to a typed field value, or a decode failure.
//!
//! # Invariants
//! - Numeric fields accept surrounding whitespace; `name` is kept verbatim.
//! - A cleared calories input decodes to `0`.
//! - Categories must exist in the reference list.

use crate::model::category::{find_category, CategoryId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editable fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Category,
    Name,
    Calories,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Name => "name",
            Self::Calories => "calories",
        }
    }
}

/// Typed result of decoding one field input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Category(CategoryId),
    Name(String),
    Calories(i64),
}

/// Field decode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDecodeError {
    NotANumber { field: FormField, input: String },
    UnknownCategory(CategoryId),
}

impl Display for FieldDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber { field, input } => {
                write!(f, "{} expects a whole number, got `{input}`", field.as_str())
            }
            Self::UnknownCategory(id) => write!(f, "unknown category id: {id}"),
        }
    }
}

impl Error for FieldDecodeError {}

/// Decodes raw text input for `field`.
pub fn decode_field(field: FormField, raw: &str) -> Result<FieldValue, FieldDecodeError> {
    match field {
        FormField::Name => Ok(FieldValue::Name(raw.to_string())),
        FormField::Category => {
            let trimmed = raw.trim();
            let id = trimmed
                .parse::<CategoryId>()
                .map_err(|_| FieldDecodeError::NotANumber {
                    field,
                    input: trimmed.to_string(),
                })?;
            find_category(id)
                .map(|category| FieldValue::Category(category.id))
                .ok_or(FieldDecodeError::UnknownCategory(id))
        }
        FormField::Calories => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(FieldValue::Calories(0));
            }
            trimmed
                .parse::<i64>()
                .map(FieldValue::Calories)
                .map_err(|_| FieldDecodeError::NotANumber {
                    field,
                    input: trimmed.to_string(),
                })
        }
    }
}
