//! Interpretation cycle: parse, execute, or suspend for log entry.
//!
//! # Responsibility
//! - Run one input line through dispatch, parsing and execution.
//! - Suspend add-log cycles that need a multi-line body and resume them on
//!   an explicit submit or cancel from the presentation layer.
//!
//! # Invariants
//! - A failed cycle never mutates the model.
//! - A cancelled entry never mutates the model and is not an error.
//! - Diagnostics carry metadata only (command word, error kind), never names
//!   or log text.
//!
//! Diagnostics go through the `log` facade, which is the injectable sink: the
//! caller picks the backend (see `logging::init_logging`) or installs none.

use crate::command::{AddLogCommand, Command, CommandError, CommandResult};
use crate::config::InterpreterConfig;
use crate::model::book::Model;
use crate::model::identity::IdentityNumber;
use crate::model::log::AppointmentDate;
use crate::parser::commands::{LogDraft, Parsed};
use crate::parser::error::ParseError;
use crate::parser::{find_command, parse_command, split_command_word};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable category of a cycle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownCommand,
    InvalidCommandFormat,
    DuplicateField,
    MissingField,
    InvalidFieldFormat,
    SubjectNotFound,
    DuplicatePerson,
    InvalidIndex,
    NotImplemented,
}

impl ErrorKind {
    /// Stable string used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::InvalidCommandFormat => "invalid_command_format",
            Self::DuplicateField => "duplicate_field",
            Self::MissingField => "missing_field",
            Self::InvalidFieldFormat => "invalid_field_format",
            Self::SubjectNotFound => "subject_not_found",
            Self::DuplicatePerson => "duplicate_person",
            Self::InvalidIndex => "invalid_index",
            Self::NotImplemented => "not_implemented",
        }
    }
}

/// Failure of one interpretation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    Parse(ParseError),
    Command(CommandError),
}

impl LogicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(ParseError::UnknownCommand(_)) => ErrorKind::UnknownCommand,
            Self::Parse(ParseError::InvalidCommandFormat { .. }) => ErrorKind::InvalidCommandFormat,
            Self::Parse(ParseError::DuplicateField(_)) => ErrorKind::DuplicateField,
            Self::Parse(ParseError::MissingField { .. }) => ErrorKind::MissingField,
            Self::Parse(ParseError::InvalidFieldFormat(_)) => ErrorKind::InvalidFieldFormat,
            Self::Command(CommandError::SubjectNotFound(_)) => ErrorKind::SubjectNotFound,
            Self::Command(CommandError::DuplicatePerson(_)) => ErrorKind::DuplicatePerson,
            Self::Command(CommandError::InvalidPersonIndex { .. }) => ErrorKind::InvalidIndex,
            Self::Command(CommandError::NotImplemented(_)) => ErrorKind::NotImplemented,
        }
    }
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Command(err) => Some(err),
        }
    }
}

impl From<ParseError> for LogicError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CommandError> for LogicError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

/// Suspended add-log cycle waiting for a log body.
///
/// Only the interpreter creates these; resuming consumes the token.
#[derive(Debug)]
pub struct PendingEntry {
    draft: LogDraft,
}

impl PendingEntry {
    pub fn identity_number(&self) -> &IdentityNumber {
        self.draft.identity_number()
    }

    pub fn date(&self) -> AppointmentDate {
        self.draft.date()
    }
}

/// Presentation-layer answer to a suspended entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryResponse {
    /// Entered body, with real newlines.
    Submit(String),
    Cancel,
}

/// How a cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    Completed(CommandResult),
    AwaitingEntry(PendingEntry),
    /// The user abandoned a suspended entry; nothing changed.
    Cancelled,
}

/// Runs interpretation cycles against one model.
#[derive(Debug, Default)]
pub struct Interpreter {
    model: Model,
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(model: Model, config: InterpreterConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interprets one input line.
    ///
    /// # Errors
    /// - `LogicError::Parse` when the line cannot become a command.
    /// - `LogicError::Command` when execution rejects the command.
    pub fn submit(&mut self, text: &str) -> Result<CycleOutcome, LogicError> {
        let (word, _) = split_command_word(text.trim());
        let parsed = match parse_command(text, &self.config) {
            Ok(parsed) => parsed,
            Err(err) => return Err(self.reject(word, err.into())),
        };

        match parsed {
            Parsed::Ready(command) => {
                info!("event=command_parse module=logic status=ok word={word}");
                self.execute(command)
            }
            Parsed::NeedsEntry(draft) => {
                info!("event=entry_suspend module=logic status=ok word={word}");
                Ok(CycleOutcome::AwaitingEntry(PendingEntry { draft }))
            }
        }
    }

    /// Finishes a suspended add-log cycle.
    ///
    /// `Cancel` returns `CycleOutcome::Cancelled` and leaves the model as is.
    pub fn resume(
        &mut self,
        pending: PendingEntry,
        response: EntryResponse,
    ) -> Result<CycleOutcome, LogicError> {
        let word = AddLogCommand::WORD;
        let body = match response {
            EntryResponse::Submit(body) => body,
            EntryResponse::Cancel => {
                info!("event=entry_resume module=logic status=cancelled word={word}");
                return Ok(CycleOutcome::Cancelled);
            }
        };

        let command = match pending.draft.complete(&body, &self.config) {
            Ok(command) => command,
            Err(err) => return Err(self.reject(word, err.into())),
        };
        info!("event=entry_resume module=logic status=ok word={word}");
        self.execute(command)
    }

    fn execute(&mut self, command: Command) -> Result<CycleOutcome, LogicError> {
        let word = command.word();
        match command.execute(&mut self.model) {
            Ok(result) => {
                info!("event=command_execute module=logic status=ok word={word}");
                Ok(CycleOutcome::Completed(result))
            }
            Err(err) => Err(self.reject(word, err.into())),
        }
    }

    fn reject(&self, word: &str, err: LogicError) -> LogicError {
        let word = find_command(word).map_or("unknown", |spec| spec.word);
        warn!(
            "event=command_rejected module=logic status=error word={} error_kind={}",
            word,
            err.kind().as_str()
        );
        err
    }
}
