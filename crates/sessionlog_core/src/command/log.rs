//! Commands over session logs.

use crate::command::{CommandError, CommandResult, UiDirective};
use crate::model::book::Model;
use crate::model::identity::IdentityNumber;
use crate::model::index::Index;
use crate::model::log::{AppointmentDate, LogBody, LogEntry};
use log::debug;

/// Appends one log to an existing person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLogCommand {
    identity_number: IdentityNumber,
    date: AppointmentDate,
    body: LogBody,
}

impl AddLogCommand {
    pub const WORD: &'static str = "addlog";
    pub const USAGE: &'static str = "addlog: Adds a session log to the person with the given identity number.\n\
        Parameters: i/IDENTITY_NUMBER d/DATE [l/LOG]\n\
        Leave out l/ to write a multi-line log in the entry prompt; inline logs may use \\n for line breaks.\n\
        Example: addlog i/S1234567A d/2024-01-31 l/Discussed sleep schedule";

    pub fn new(identity_number: IdentityNumber, date: AppointmentDate, body: LogBody) -> Self {
        Self {
            identity_number,
            date,
            body,
        }
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

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let entry = LogEntry::new(self.identity_number.clone(), self.date, self.body.clone());
        let log_id = entry.id();
        model.append_log(entry)?;
        debug!(
            "event=log_append module=command status=ok log_id={} lines={}",
            log_id,
            self.body.line_count()
        );
        Ok(CommandResult::new(format!(
            "New log added for {} on {}",
            self.identity_number, self.date
        )))
    }
}

/// Lists one person's logs, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLogsCommand {
    identity_number: IdentityNumber,
}

impl ListLogsCommand {
    pub const WORD: &'static str = "logs";
    pub const USAGE: &'static str = "logs: Lists all logs of the person with the given identity number, oldest first.\n\
        Parameters: IDENTITY_NUMBER\n\
        Example: logs S1234567A";

    pub fn new(identity_number: IdentityNumber) -> Self {
        Self { identity_number }
    }

    pub fn identity_number(&self) -> &IdentityNumber {
        &self.identity_number
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let entries = model.logs_for(&self.identity_number)?.to_vec();
        Ok(CommandResult::with_directive(
            format!(
                "Listed {} log(s) for {}",
                entries.len(),
                self.identity_number
            ),
            UiDirective::ShowLogs {
                identity_number: self.identity_number.clone(),
                entries,
            },
        ))
    }
}

/// Removes one log from a person. Parsed in full; execution is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteLogCommand {
    identity_number: IdentityNumber,
    index: Index,
}

impl DeleteLogCommand {
    pub const WORD: &'static str = "deletelog";
    pub const USAGE: &'static str = "deletelog: Deletes the log at the given index (as shown by `logs`) from the person with the given identity number.\n\
        Parameters: INDEX i/IDENTITY_NUMBER\n\
        Example: deletelog 2 i/S1234567A";

    pub fn new(identity_number: IdentityNumber, index: Index) -> Self {
        Self {
            identity_number,
            index,
        }
    }

    pub fn identity_number(&self) -> &IdentityNumber {
        &self.identity_number
    }

    pub fn index(&self) -> Index {
        self.index
    }

    pub fn execute(&self, _model: &mut Model) -> Result<CommandResult, CommandError> {
        Err(CommandError::NotImplemented(Self::WORD))
    }
}
