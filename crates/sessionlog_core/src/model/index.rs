//! One-based positional index used by list-addressing commands.

use crate::model::field::FieldError;
use std::fmt::{Display, Formatter};

/// Position in a displayed list. Stored zero-based, entered one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    /// Returns `None` for `0`, which is not a valid one-based position.
    pub fn from_one_based(value: usize) -> Option<Self> {
        value.checked_sub(1).map(Self)
    }

    /// Parses a user-entered one-based index.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(Self::from_one_based)
            .ok_or_else(|| FieldError::new("index", trimmed, "index must be a positive integer"))
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

#[cfg(test)]
mod tests {
    use super::Index;

    #[test]
    fn parses_one_based_input() {
        let index = Index::parse(" 3 ").unwrap();
        assert_eq!(index.zero_based(), 2);
        assert_eq!(index.to_string(), "3");
    }

    #[test]
    fn rejects_zero_negative_and_text() {
        for value in ["0", "-1", "one", "", "1 2"] {
            assert!(Index::parse(value).is_err(), "`{value}` must be rejected");
        }
    }
}
