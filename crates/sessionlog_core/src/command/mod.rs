//! Parsed commands and their execution against the model.
//!
//! # Responsibility
//! - Represent each user intent as an immutable, fully validated value.
//! - Apply that intent to the `Model` through one `execute` call.
//!
//! # Invariants
//! - Commands hold validated field types only, never raw text.
//! - `execute` checks every precondition before its single mutating call, so
//!   a failed command leaves the model untouched.

pub mod general;
pub mod log;
pub mod person;

use crate::model::book::{Model, ModelError};
use crate::model::identity::IdentityNumber;
use crate::model::index::Index;
use crate::model::log::LogEntry;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use general::{ExitCommand, HelpCommand};
pub use log::{AddLogCommand, DeleteLogCommand, ListLogsCommand};
pub use person::{AddCommand, ClearCommand, DeleteCommand, FindCommand, ListCommand};

/// One unit of intent produced by a command factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    List(ListCommand),
    Find(FindCommand),
    Clear(ClearCommand),
    Help(HelpCommand),
    Exit(ExitCommand),
    AddLog(AddLogCommand),
    ListLogs(ListLogsCommand),
    DeleteLog(DeleteLogCommand),
}

impl Command {
    /// Applies this command to the model.
    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        match self {
            Self::Add(command) => command.execute(model),
            Self::Delete(command) => command.execute(model),
            Self::List(command) => command.execute(model),
            Self::Find(command) => command.execute(model),
            Self::Clear(command) => command.execute(model),
            Self::Help(command) => command.execute(model),
            Self::Exit(command) => command.execute(model),
            Self::AddLog(command) => command.execute(model),
            Self::ListLogs(command) => command.execute(model),
            Self::DeleteLog(command) => command.execute(model),
        }
    }

    /// Command word this command was parsed from.
    pub fn word(&self) -> &'static str {
        match self {
            Self::Add(_) => AddCommand::WORD,
            Self::Delete(_) => DeleteCommand::WORD,
            Self::List(_) => ListCommand::WORD,
            Self::Find(_) => FindCommand::WORD,
            Self::Clear(_) => ClearCommand::WORD,
            Self::Help(_) => HelpCommand::WORD,
            Self::Exit(_) => ExitCommand::WORD,
            Self::AddLog(_) => AddLogCommand::WORD,
            Self::ListLogs(_) => ListLogsCommand::WORD,
            Self::DeleteLog(_) => DeleteLogCommand::WORD,
        }
    }
}

/// Presentation hint attached to a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiDirective {
    ShowHelp,
    Exit,
    /// Show one person's logs, oldest first.
    ShowLogs {
        identity_number: IdentityNumber,
        entries: Vec<LogEntry>,
    },
}

/// Successful outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    feedback: String,
    directive: Option<UiDirective>,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            directive: None,
        }
    }

    pub fn with_directive(feedback: impl Into<String>, directive: UiDirective) -> Self {
        Self {
            feedback: feedback.into(),
            directive: Some(directive),
        }
    }

    pub fn feedback(&self) -> &str {
        self.feedback.as_str()
    }

    pub fn directive(&self) -> Option<&UiDirective> {
        self.directive.as_ref()
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.directive, Some(UiDirective::Exit))
    }

    pub fn is_show_help(&self) -> bool {
        matches!(self.directive, Some(UiDirective::ShowHelp))
    }
}

/// Execution-stage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    SubjectNotFound(IdentityNumber),
    DuplicatePerson(IdentityNumber),
    InvalidPersonIndex { index: Index, len: usize },
    /// Recognised and well-formed, but execution is not available yet.
    NotImplemented(&'static str),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubjectNotFound(id) => write!(f, "no person found with identity number {id}"),
            Self::DuplicatePerson(id) => {
                write!(f, "a person with identity number {id} already exists")
            }
            Self::InvalidPersonIndex { index, len } => write!(
                f,
                "the person index {index} is invalid; {len} person(s) currently listed"
            ),
            Self::NotImplemented(word) => write!(f, "`{word}` is not implemented yet"),
        }
    }
}

impl Error for CommandError {}

impl From<ModelError> for CommandError {
    fn from(value: ModelError) -> Self {
        match value {
            ModelError::SubjectNotFound(id) => Self::SubjectNotFound(id),
            ModelError::DuplicatePerson(id) => Self::DuplicatePerson(id),
            ModelError::IndexOutOfRange { index, len } => Self::InvalidPersonIndex { index, len },
        }
    }
}
