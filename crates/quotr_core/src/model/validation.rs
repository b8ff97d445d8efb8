//! Field-level validation errors for user-supplied drafts.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected input, always attributed to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty after trimming.
    Blank { field: &'static str },
    /// Field exceeds its maximum length in characters.
    TooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// Referenced book does not exist.
    UnknownBook(i64),
    /// Value must be unique but is already taken.
    Duplicate { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending field, for form-level error placement.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } | Self::Duplicate { field, .. } => {
                *field
            }
            Self::UnknownBook(_) => "book",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "{field}: this field is required"),
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{field}: ensure this value has at most {max_chars} characters (it has {actual_chars})"
            ),
            Self::UnknownBook(id) => write!(f, "book: select a valid choice, {id} is not available"),
            Self::Duplicate { field, value } => write!(f, "{field}: `{value}` is already taken"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank values and values longer than `max_chars`.
pub(crate) fn check_required(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    check_max_chars(field, value, max_chars)
}

pub(crate) fn check_max_chars(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}
