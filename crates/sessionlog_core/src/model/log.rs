//! Session log model.
//!
//! # Responsibility
//! - Validate appointment dates and log bodies.
//! - Provide the newline escape codec used to carry multi-line bodies through
//!   the single-line command interface.
//!
//! # Invariants
//! - `decode_newlines(&encode_newlines(s)) == s` for every `s`.
//! - A `LogEntry` is never mutated after creation.
//! - Dates compare by calendar value.

use crate::model::field::FieldError;
use crate::model::identity::IdentityNumber;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one log entry.
pub type LogId = Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date shape regex"));

/// Calendar date of a session, written `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppointmentDate(NaiveDate);

impl AppointmentDate {
    /// Parses a `YYYY-MM-DD` date, rejecting impossible calendar days.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if !DATE_SHAPE_RE.is_match(trimmed) {
            return Err(date_error(trimmed));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| date_error(trimmed))
    }
}

fn date_error(value: &str) -> FieldError {
    FieldError::new(
        "date",
        value,
        "dates must be valid calendar days written as YYYY-MM-DD (e.g. 2024-01-31)",
    )
}

impl Display for AppointmentDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for AppointmentDate {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AppointmentDate> for String {
    fn from(value: AppointmentDate) -> Self {
        value.to_string()
    }
}

/// Free-text log body with real newlines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogBody(String);

impl LogBody {
    /// Validates a body that may still carry `\n` escapes.
    ///
    /// Escapes are decoded first; the result must not be blank. Surrounding
    /// whitespace is kept as entered.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let decoded = decode_newlines(value);
        if decoded.trim().is_empty() {
            return Err(FieldError::new(
                "log",
                value.trim(),
                "log entries must not be blank",
            ));
        }
        Ok(Self(decoded))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of lines in the body.
    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl Display for LogBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LogBody {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // Serialized bodies carry real newlines; escape before validating so
        // stored backslashes survive unchanged.
        Self::parse(&encode_newlines(&value))
    }
}

impl From<LogBody> for String {
    fn from(value: LogBody) -> Self {
        value.0
    }
}

/// One dated session log attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    id: LogId,
    identity_number: IdentityNumber,
    date: AppointmentDate,
    body: LogBody,
}

impl LogEntry {
    /// Creates an entry with a generated stable ID.
    pub fn new(identity_number: IdentityNumber, date: AppointmentDate, body: LogBody) -> Self {
        Self::with_id(Uuid::new_v4(), identity_number, date, body)
    }

    /// Creates an entry with a known ID, used when loading from storage.
    pub fn with_id(
        id: LogId,
        identity_number: IdentityNumber,
        date: AppointmentDate,
        body: LogBody,
    ) -> Self {
        Self {
            id,
            identity_number,
            date,
            body,
        }
    }

    pub fn id(&self) -> LogId {
        self.id
    }

    pub fn identity_number(&self) -> &IdentityNumber {
        &self.identity_number
    }

    pub fn date(&self) -> AppointmentDate {
        self.date
    }

    pub fn body(&self) -> &LogBody {
        &self.body
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.date, self.body)
    }
}

/// Escapes backslashes and newlines so text fits on one command line.
pub fn encode_newlines(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => encoded.push_str("\\\\"),
            '\n' => encoded.push_str("\\n"),
            other => encoded.push(other),
        }
    }
    encoded
}

/// Reverses `encode_newlines`. Unknown escape sequences are kept verbatim.
pub fn decode_newlines(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('\\') => decoded.push('\\'),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            }
            None => decoded.push('\\'),
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::{decode_newlines, encode_newlines, AppointmentDate, LogBody};

    #[test]
    fn date_validation_follows_the_calendar() {
        assert!(AppointmentDate::parse("2024-02-29").is_ok());
        assert!(AppointmentDate::parse("2024-02-30").is_err());
        assert!(AppointmentDate::parse("2023-02-29").is_err());
        assert!(AppointmentDate::parse("2024-04-31").is_err());
    }

    #[test]
    fn date_rejects_other_shapes() {
        for value in ["2024-1-01", "01-01-2024", "+2024-01-01", "2024/01/01", "", "20240101"] {
            assert!(AppointmentDate::parse(value).is_err(), "`{value}` must be rejected");
        }
    }

    #[test]
    fn dates_order_by_calendar_value() {
        let earlier = AppointmentDate::parse("2023-12-31").unwrap();
        let later = AppointmentDate::parse("2024-01-01").unwrap();
        assert!(earlier < later);
        assert_eq!(later.to_string(), "2024-01-01");
    }

    #[test]
    fn body_decodes_escapes_and_rejects_blank() {
        let body = LogBody::parse("line one\\nline two").unwrap();
        assert_eq!(body.as_str(), "line one\nline two");
        assert_eq!(body.line_count(), 2);
        assert!(LogBody::parse("   ").is_err());
        assert!(LogBody::parse("\\n\\n").is_err());
    }

    #[test]
    fn body_keeps_surrounding_whitespace() {
        let body = LogBody::parse("  indented\\n").unwrap();
        assert_eq!(body.as_str(), "  indented\n");
    }

    #[test]
    fn codec_handles_literal_backslash_sequences() {
        for original in ["a\nb", "path C:\\notes", "literal \\n stays", "trailing \\", "x\n\\n\ny"] {
            assert_eq!(decode_newlines(&encode_newlines(original)), original);
        }
    }

    #[test]
    fn unknown_escapes_are_kept() {
        assert_eq!(decode_newlines("tab\\tkept"), "tab\\tkept");
    }
}
