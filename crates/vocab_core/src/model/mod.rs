//! Domain model for the teacher → student → unit → word hierarchy.
//!
//! # Responsibility
//! - Define canonical records read and written by repositories.
//! - Own input validation shared by every write path.
//!
//! # Invariants
//! - Every record is identified by a SQLite integer primary key.
//! - Unit indices are derived state and have no user-facing setter.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod student;
pub mod teacher;
pub mod unit;
pub mod word;

/// Input validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Text field exceeds its maximum character count.
    TooLong { field: &'static str, max_chars: usize },
    /// Email does not contain a local part and a domain.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` cannot be empty"),
            Self::TooLong { field, max_chars } => {
                write!(f, "`{field}` exceeds {max_chars} characters")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) const MAX_NAME_CHARS: usize = 200;

/// Trims `value` and rejects empty or oversized input.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field,
            max_chars: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// Trims `value`, mapping blank input to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{optional_text, required_text, ValidationError};

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("login", "  anna ").unwrap(), "anna");
        assert_eq!(
            required_text("login", "   ").unwrap_err(),
            ValidationError::EmptyField("login")
        );
    }

    #[test]
    fn required_text_rejects_oversized_input() {
        let long = "x".repeat(201);
        assert!(matches!(
            required_text("name", &long),
            Err(ValidationError::TooLong { field: "name", .. })
        ));
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" food ")), Some("food".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
