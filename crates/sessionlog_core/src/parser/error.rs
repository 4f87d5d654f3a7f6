//! Parse-stage errors.

use crate::model::field::FieldError;
use crate::parser::syntax::Prefix;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure raised before a command is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Leading word matches no known command.
    UnknownCommand(String),
    /// Known command, but the overall shape (or positional text) is wrong.
    InvalidCommandFormat { usage: &'static str },
    /// Singular prefixes given more than once, with their occurrence counts.
    DuplicateField(Vec<(Prefix, usize)>),
    /// Required prefixes absent.
    MissingField {
        missing: Vec<Prefix>,
        usage: &'static str,
    },
    /// A present value failed its field validator.
    InvalidFieldFormat(FieldError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(word) => write!(
                f,
                "unknown command `{word}`; type `help` to see available commands"
            ),
            Self::InvalidCommandFormat { usage } => write!(f, "invalid command format\n{usage}"),
            Self::DuplicateField(repeats) => {
                let listed = repeats
                    .iter()
                    .map(|(prefix, count)| format!("{prefix} ({count} values)"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "multiple values specified for single-valued field(s): {listed}"
                )
            }
            Self::MissingField { missing, usage } => {
                let listed = missing
                    .iter()
                    .map(|prefix| prefix.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "missing required field(s): {listed}\n{usage}")
            }
            Self::InvalidFieldFormat(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFieldFormat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ParseError {
    fn from(value: FieldError) -> Self {
        Self::InvalidFieldFormat(value)
    }
}
