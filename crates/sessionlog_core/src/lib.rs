//! Core logic for the session log record book.
//! This crate owns parsing, validation and record invariants; front ends only
//! read lines and render results.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod logic;
pub mod model;
pub mod parser;
pub mod repo;

pub use command::{Command, CommandError, CommandResult, UiDirective};
pub use config::{AppConfig, ConfigError, InterpreterConfig, DEFAULT_DATA_FILE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use logic::{CycleOutcome, EntryResponse, ErrorKind, Interpreter, LogicError, PendingEntry};
pub use model::book::{Model, ModelError, NameKeywords, RecordBook};
pub use model::field::FieldError;
pub use model::identity::{IdentityNumber, IdentityPattern, PatternError, NRIC_PATTERN};
pub use model::index::Index;
pub use model::log::{AppointmentDate, LogBody, LogEntry, LogId};
pub use model::person::{Address, Email, Name, Person, Phone};
pub use parser::error::ParseError;
pub use parser::help_text;
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
