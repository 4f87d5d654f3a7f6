//! Subject identity numbers.
//!
//! # Responsibility
//! - Validate identity numbers against a structural pattern.
//! - Keep one canonical (uppercase) representation for equality and storage.
//!
//! # Invariants
//! - Matching is always anchored and case-insensitive.
//! - No checksum is computed; only the structural pattern is enforced.

use crate::model::field::FieldError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default structural rule: prefix letter, seven digits, suffix letter.
pub const NRIC_PATTERN: &str = "[STFGM][0-9]{7}[A-Z]";

const FIELD_NAME: &str = "identity number";

static DEFAULT_PATTERN: Lazy<IdentityPattern> = Lazy::new(|| {
    IdentityPattern::new(NRIC_PATTERN).expect("default identity pattern must compile")
});

/// Configurable structural rule for identity numbers.
#[derive(Debug, Clone)]
pub struct IdentityPattern {
    source: String,
    regex: Regex,
}

impl IdentityPattern {
    /// Compiles a pattern. The expression is wrapped so it must match the
    /// whole input, ignoring case.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let source = pattern.trim();
        if source.is_empty() {
            return Err(PatternError::Empty);
        }
        let regex = RegexBuilder::new(&format!("^(?:{source})$"))
            .case_insensitive(true)
            .build()
            .map_err(|err| PatternError::Invalid {
                pattern: source.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Shared default rule (`NRIC_PATTERN`).
    pub fn nric() -> &'static IdentityPattern {
        &DEFAULT_PATTERN
    }

    pub fn as_str(&self) -> &str {
        self.source.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    fn constraint(&self) -> String {
        if self.source == NRIC_PATTERN {
            "identity numbers start with S, T, F, G or M, followed by 7 digits and end with a letter (e.g. S1234567A)".to_string()
        } else {
            format!("identity numbers must match `{}`", self.source)
        }
    }
}

impl Default for IdentityPattern {
    fn default() -> Self {
        Self::nric().clone()
    }
}

impl PartialEq for IdentityPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for IdentityPattern {}

/// Identity pattern construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    Empty,
    Invalid { pattern: String, reason: String },
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "identity pattern must not be empty"),
            Self::Invalid { pattern, reason } => {
                write!(f, "identity pattern `{pattern}` is invalid: {reason}")
            }
        }
    }
}

impl Error for PatternError {}

/// Validated subject identifier, stored uppercase.
///
/// Deserialization validates against the default pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityNumber(String);

impl IdentityNumber {
    /// Validates against the default pattern.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        Self::parse_with(value, IdentityPattern::nric())
    }

    /// Validates against a caller-provided pattern.
    pub fn parse_with(value: &str, pattern: &IdentityPattern) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if !pattern.is_match(trimmed) {
            return Err(FieldError::new(FIELD_NAME, trimmed, pattern.constraint()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for IdentityNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IdentityNumber {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IdentityNumber> for String {
    fn from(value: IdentityNumber) -> Self {
        value.0
    }
}
