//! Command-line grammar: tokenizer, factories and the dispatch table.
//!
//! # Responsibility
//! - Select a command factory by the leading command word.
//! - Hand the remaining text to that factory.
//!
//! # Invariants
//! - Lookup is an exact match on the first whitespace-delimited token.
//! - An unknown word is reported as `UnknownCommand`, never as a format error.

pub mod commands;
pub mod error;
pub mod syntax;
pub mod tokenizer;

use crate::command::{
    AddCommand, AddLogCommand, ClearCommand, DeleteCommand, DeleteLogCommand, ExitCommand,
    FindCommand, HelpCommand, ListCommand, ListLogsCommand,
};
use crate::config::InterpreterConfig;
use commands::Parsed;
use error::{ParseError, ParseResult};

type CommandFactory = fn(&str, &InterpreterConfig) -> ParseResult<Parsed>;

/// Dispatch table entry for one command word.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub word: &'static str,
    pub usage: &'static str,
    factory: CommandFactory,
}

const COMMAND_TABLE: &[CommandSpec] = &[
    CommandSpec {
        word: AddCommand::WORD,
        usage: AddCommand::USAGE,
        factory: commands::parse_add,
    },
    CommandSpec {
        word: DeleteCommand::WORD,
        usage: DeleteCommand::USAGE,
        factory: commands::parse_delete,
    },
    CommandSpec {
        word: ListCommand::WORD,
        usage: ListCommand::USAGE,
        factory: commands::parse_list,
    },
    CommandSpec {
        word: FindCommand::WORD,
        usage: FindCommand::USAGE,
        factory: commands::parse_find,
    },
    CommandSpec {
        word: ClearCommand::WORD,
        usage: ClearCommand::USAGE,
        factory: commands::parse_clear,
    },
    CommandSpec {
        word: AddLogCommand::WORD,
        usage: AddLogCommand::USAGE,
        factory: commands::parse_add_log,
    },
    CommandSpec {
        word: ListLogsCommand::WORD,
        usage: ListLogsCommand::USAGE,
        factory: commands::parse_list_logs,
    },
    CommandSpec {
        word: DeleteLogCommand::WORD,
        usage: DeleteLogCommand::USAGE,
        factory: commands::parse_delete_log,
    },
    CommandSpec {
        word: HelpCommand::WORD,
        usage: HelpCommand::USAGE,
        factory: commands::parse_help,
    },
    CommandSpec {
        word: ExitCommand::WORD,
        usage: ExitCommand::USAGE,
        factory: commands::parse_exit,
    },
];

/// Returns the dispatch table in help order.
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_TABLE
}

/// Looks up one command word.
pub fn find_command(word: &str) -> Option<&'static CommandSpec> {
    COMMAND_TABLE.iter().find(|spec| spec.word == word)
}

/// Usage text for every command, separated by blank lines.
pub fn help_text() -> String {
    COMMAND_TABLE
        .iter()
        .map(|spec| spec.usage)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Parses one raw input line.
pub fn parse_command(input: &str, config: &InterpreterConfig) -> ParseResult<Parsed> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidCommandFormat {
            usage: HelpCommand::USAGE,
        });
    }

    let (word, args) = split_command_word(trimmed);
    let spec = find_command(word).ok_or_else(|| ParseError::UnknownCommand(word.to_string()))?;
    (spec.factory)(args, config)
}

/// Splits the leading command word from its arguments.
///
/// The arguments keep their leading whitespace so a marker right after the
/// word still starts a segment.
pub fn split_command_word(input: &str) -> (&str, &str) {
    match input.find(char::is_whitespace) {
        Some(split) => (&input[..split], &input[split..]),
        None => (input, ""),
    }
}
