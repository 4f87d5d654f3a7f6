//! Command factories, one per command word.
//!
//! # Responsibility
//! - Turn tokenized arguments into validated commands.
//! - Signal when an add-log command needs interactive body entry.
//!
//! # Invariants
//! - Checks run in a fixed order: duplicates, required prefixes, preamble,
//!   then field validation. The first failure is the one reported.
//! - Field checks are delegated to the value types' `parse` functions.

use crate::command::{
    AddCommand, AddLogCommand, ClearCommand, Command, DeleteCommand, DeleteLogCommand,
    ExitCommand, FindCommand, HelpCommand, ListCommand, ListLogsCommand,
};
use crate::config::InterpreterConfig;
use crate::model::book::NameKeywords;
use crate::model::identity::IdentityNumber;
use crate::model::index::Index;
use crate::model::log::{encode_newlines, AppointmentDate, LogBody};
use crate::model::person::{Address, Email, Name, Person, Phone};
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::syntax::{
    Prefix, PREFIX_ADDRESS, PREFIX_DATE, PREFIX_EMAIL, PREFIX_IDENTITY_NUMBER, PREFIX_LOG,
    PREFIX_NAME, PREFIX_PHONE,
};
use crate::parser::tokenizer::{tokenize, ArgumentMap};

const ADD_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_IDENTITY_NUMBER,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
];
const ADD_LOG_PREFIXES: &[Prefix] = &[PREFIX_IDENTITY_NUMBER, PREFIX_DATE, PREFIX_LOG];
const DELETE_LOG_PREFIXES: &[Prefix] = &[PREFIX_IDENTITY_NUMBER];

/// Factory output: a ready command, or a draft waiting for a log body.
#[derive(Debug)]
pub enum Parsed {
    Ready(Command),
    NeedsEntry(LogDraft),
}

/// Validated add-log arguments still missing the log body.
#[derive(Debug)]
pub struct LogDraft {
    identity_number: IdentityNumber,
    date: AppointmentDate,
    args: ArgumentMap,
}

impl LogDraft {
    pub fn identity_number(&self) -> &IdentityNumber {
        &self.identity_number
    }

    pub fn date(&self) -> AppointmentDate {
        self.date
    }

    /// Adds the entered body as the `l/` argument and builds the command.
    ///
    /// The body is escaped and inserted after tokenization, so it may contain
    /// prefix markers and real newlines.
    pub fn complete(self, body: &str, config: &InterpreterConfig) -> ParseResult<Command> {
        let mut args = self.args;
        args.push(PREFIX_LOG, encode_newlines(body));
        match parse_add_log_args(args, config)? {
            Parsed::Ready(command) => Ok(command),
            Parsed::NeedsEntry(_) => Err(ParseError::InvalidCommandFormat {
                usage: AddLogCommand::USAGE,
            }),
        }
    }
}

pub fn parse_add(args: &str, config: &InterpreterConfig) -> ParseResult<Parsed> {
    let map = tokenize(args, ADD_PREFIXES);
    map.verify_no_duplicate_prefixes_for(ADD_PREFIXES)?;
    map.require_prefixes(ADD_PREFIXES, AddCommand::USAGE)?;
    require_empty_preamble(&map, AddCommand::USAGE)?;

    let person = Person::new(
        Name::parse(required_value(&map, PREFIX_NAME, AddCommand::USAGE)?)?,
        IdentityNumber::parse_with(
            required_value(&map, PREFIX_IDENTITY_NUMBER, AddCommand::USAGE)?,
            &config.identity_pattern,
        )?,
        Phone::parse(required_value(&map, PREFIX_PHONE, AddCommand::USAGE)?)?,
        Email::parse(required_value(&map, PREFIX_EMAIL, AddCommand::USAGE)?)?,
        Address::parse(required_value(&map, PREFIX_ADDRESS, AddCommand::USAGE)?)?,
    );
    Ok(Parsed::Ready(Command::Add(AddCommand::new(person))))
}

pub fn parse_delete(args: &str, _config: &InterpreterConfig) -> ParseResult<Parsed> {
    let index = parse_positional_index(args.trim(), DeleteCommand::USAGE)?;
    Ok(Parsed::Ready(Command::Delete(DeleteCommand::new(index))))
}

pub fn parse_list(args: &str, _config: &InterpreterConfig) -> ParseResult<Parsed> {
    require_no_arguments(args, ListCommand::USAGE)?;
    Ok(Parsed::Ready(Command::List(ListCommand)))
}

pub fn parse_find(args: &str, _config: &InterpreterConfig) -> ParseResult<Parsed> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidCommandFormat {
            usage: FindCommand::USAGE,
        });
    }
    Ok(Parsed::Ready(Command::Find(FindCommand::new(
        NameKeywords::new(keywords),
    ))))
}

pub fn parse_clear(args: &str, _config: &InterpreterConfig) -> ParseResult<Parsed> {
    require_no_arguments(args, ClearCommand::USAGE)?;
    Ok(Parsed::Ready(Command::Clear(ClearCommand)))
}

pub fn parse_help(args: &str, _config: &InterpreterConfig) -> ParseResult<Parsed> {
    require_no_arguments(args, HelpCommand::USAGE)?;
    Ok(Parsed::Ready(Command::Help(HelpCommand)))
}

pub fn parse_exit(args: &str, _config: &InterpreterConfig) -> ParseResult<Parsed> {
    require_no_arguments(args, ExitCommand::USAGE)?;
    Ok(Parsed::Ready(Command::Exit(ExitCommand)))
}

/// Parses `addlog`. Missing `l/` with valid `i/` and `d/` yields a draft.
pub fn parse_add_log(args: &str, config: &InterpreterConfig) -> ParseResult<Parsed> {
    parse_add_log_args(tokenize(args, ADD_LOG_PREFIXES), config)
}

fn parse_add_log_args(map: ArgumentMap, config: &InterpreterConfig) -> ParseResult<Parsed> {
    let usage = AddLogCommand::USAGE;
    map.verify_no_duplicate_prefixes_for(ADD_LOG_PREFIXES)?;

    let awaits_body = !map.contains(PREFIX_LOG)
        && map.contains(PREFIX_IDENTITY_NUMBER)
        && map.contains(PREFIX_DATE);
    if !awaits_body {
        map.require_prefixes(ADD_LOG_PREFIXES, usage)?;
    }
    require_empty_preamble(&map, usage)?;

    let identity_number = IdentityNumber::parse_with(
        required_value(&map, PREFIX_IDENTITY_NUMBER, usage)?,
        &config.identity_pattern,
    )?;
    let date = AppointmentDate::parse(required_value(&map, PREFIX_DATE, usage)?)?;

    if awaits_body {
        return Ok(Parsed::NeedsEntry(LogDraft {
            identity_number,
            date,
            args: map,
        }));
    }

    let body = LogBody::parse(required_value(&map, PREFIX_LOG, usage)?)?;
    Ok(Parsed::Ready(Command::AddLog(AddLogCommand::new(
        identity_number,
        date,
        body,
    ))))
}

pub fn parse_list_logs(args: &str, config: &InterpreterConfig) -> ParseResult<Parsed> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidCommandFormat {
            usage: ListLogsCommand::USAGE,
        });
    }
    let identity_number = IdentityNumber::parse_with(trimmed, &config.identity_pattern)?;
    Ok(Parsed::Ready(Command::ListLogs(ListLogsCommand::new(
        identity_number,
    ))))
}

pub fn parse_delete_log(args: &str, config: &InterpreterConfig) -> ParseResult<Parsed> {
    let usage = DeleteLogCommand::USAGE;
    let map = tokenize(args, DELETE_LOG_PREFIXES);
    map.verify_no_duplicate_prefixes_for(DELETE_LOG_PREFIXES)?;
    map.require_prefixes(DELETE_LOG_PREFIXES, usage)?;

    let index = parse_positional_index(map.preamble(), usage)?;
    let identity_number = IdentityNumber::parse_with(
        required_value(&map, PREFIX_IDENTITY_NUMBER, usage)?,
        &config.identity_pattern,
    )?;
    Ok(Parsed::Ready(Command::DeleteLog(DeleteLogCommand::new(
        identity_number,
        index,
    ))))
}

fn required_value<'a>(
    map: &'a ArgumentMap,
    prefix: Prefix,
    usage: &'static str,
) -> ParseResult<&'a str> {
    map.value(prefix).ok_or_else(|| ParseError::MissingField {
        missing: vec![prefix],
        usage,
    })
}

fn require_empty_preamble(map: &ArgumentMap, usage: &'static str) -> ParseResult<()> {
    if map.preamble().is_empty() {
        Ok(())
    } else {
        Err(ParseError::InvalidCommandFormat { usage })
    }
}

fn require_no_arguments(args: &str, usage: &'static str) -> ParseResult<()> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(ParseError::InvalidCommandFormat { usage })
    }
}

fn parse_positional_index(preamble: &str, usage: &'static str) -> ParseResult<Index> {
    if preamble.is_empty() {
        return Err(ParseError::InvalidCommandFormat { usage });
    }
    Ok(Index::parse(preamble)?)
}
