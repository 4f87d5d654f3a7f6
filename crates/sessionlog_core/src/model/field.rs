//! Field validation error shared by every value type.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Constraint violation raised by a field validator.
///
/// Carries the field name, the rejected literal and the expected format so the
/// caller can report one precise reason without re-checking the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    value: String,
    constraint: String,
}

impl FieldError {
    pub fn new(field: &'static str, value: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Human-readable field name, e.g. `identity number`.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Literal text that failed validation.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Description of the accepted format.
    pub fn constraint(&self) -> &str {
        self.constraint.as_str()
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} `{}`: {}",
            self.field, self.value, self.constraint
        )
    }
}

impl Error for FieldError {}
