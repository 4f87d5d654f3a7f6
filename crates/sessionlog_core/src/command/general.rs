//! Session-level commands that do not touch records.

use crate::command::{CommandError, CommandResult, UiDirective};
use crate::model::book::Model;

/// Shows command usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpCommand;

impl HelpCommand {
    pub const WORD: &'static str = "help";
    pub const USAGE: &'static str = "help: Shows usage for every command.\nExample: help";

    pub fn execute(&self, _model: &mut Model) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::with_directive(
            "Showing help.",
            UiDirective::ShowHelp,
        ))
    }
}

/// Ends the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitCommand;

impl ExitCommand {
    pub const WORD: &'static str = "exit";
    pub const USAGE: &'static str = "exit: Exits the program.\nExample: exit";

    pub fn execute(&self, _model: &mut Model) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::with_directive(
            "Exiting as requested.",
            UiDirective::Exit,
        ))
    }
}
