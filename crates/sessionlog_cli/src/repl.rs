//! Line-oriented read loop.
//!
//! # Responsibility
//! - Feed input lines to the interpreter and print results.
//! - Collect multi-line log bodies when an add-log cycle is suspended.
//! - Save the record book after every completed cycle.
//!
//! # Invariants
//! - Blank command lines never reach the interpreter.
//! - End of input during log entry cancels the entry.

use log::error;
use sessionlog_core::{
    help_text, CommandResult, CycleOutcome, EntryResponse, Interpreter, LogEntry, LogicError,
    PendingEntry, RecordRepository, UiDirective,
};
use std::io::{self, BufRead, Write};

const COMMAND_PROMPT: &str = "> ";
const ENTRY_PROMPT: &str = "| ";
const ENTRY_SUBMIT: &str = ".";
const ENTRY_CANCEL: &str = ":cancel";

/// Runs the read loop until `exit` or end of input.
pub fn run<R, O, E>(
    interpreter: &mut Interpreter,
    repo: &dyn RecordRepository,
    input: &mut R,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    loop {
        write!(out, "{COMMAND_PROMPT}")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut outcome = interpreter.submit(&line);
        while let Ok(CycleOutcome::AwaitingEntry(pending)) = outcome {
            let response = read_entry(&pending, input, out)?;
            outcome = interpreter.resume(pending, response);
        }

        match outcome {
            Ok(CycleOutcome::Completed(result)) => {
                render(&result, out)?;
                save(interpreter, repo, err)?;
                if result.is_exit() {
                    return Ok(());
                }
            }
            Ok(CycleOutcome::Cancelled) => writeln!(out, "Log entry cancelled.")?,
            Ok(CycleOutcome::AwaitingEntry(_)) => {}
            Err(cycle_err) => report(&cycle_err, err)?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

fn read_entry<R, O>(pending: &PendingEntry, input: &mut R, out: &mut O) -> io::Result<EntryResponse>
where
    R: BufRead,
    O: Write,
{
    writeln!(
        out,
        "Log for {} on {}. End with `{ENTRY_SUBMIT}` on its own line, or `{ENTRY_CANCEL}` to discard.",
        pending.identity_number(),
        pending.date()
    )?;

    let mut lines = Vec::new();
    loop {
        write!(out, "{ENTRY_PROMPT}")?;
        out.flush()?;
        match read_line(input)? {
            None => return Ok(EntryResponse::Cancel),
            Some(line) if line.trim() == ENTRY_CANCEL => return Ok(EntryResponse::Cancel),
            Some(line) if line.trim() == ENTRY_SUBMIT => {
                return Ok(EntryResponse::Submit(lines.join("\n")))
            }
            Some(line) => lines.push(line),
        }
    }
}

fn render<O: Write>(result: &CommandResult, out: &mut O) -> io::Result<()> {
    writeln!(out, "{}", result.feedback())?;
    match result.directive() {
        Some(UiDirective::ShowHelp) => writeln!(out, "{}", help_text())?,
        Some(UiDirective::ShowLogs { entries, .. }) => render_logs(entries, out)?,
        Some(UiDirective::Exit) | None => {}
    }
    Ok(())
}

fn render_logs<O: Write>(entries: &[LogEntry], out: &mut O) -> io::Result<()> {
    for (position, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {}", position + 1, entry.date())?;
        for line in entry.body().as_str().lines() {
            writeln!(out, "   {line}")?;
        }
    }
    Ok(())
}

fn report<E: Write>(cycle_err: &LogicError, err: &mut E) -> io::Result<()> {
    writeln!(err, "{cycle_err}")
}

fn save<E: Write>(
    interpreter: &Interpreter,
    repo: &dyn RecordRepository,
    err: &mut E,
) -> io::Result<()> {
    match repo.save_book(interpreter.model().book()) {
        Ok(()) => Ok(()),
        Err(save_err) => {
            error!("event=book_save module=cli status=error error={save_err}");
            writeln!(err, "failed to save records: {save_err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use sessionlog_core::db::open_db_in_memory;
    use sessionlog_core::{
        IdentityNumber, Interpreter, RecordRepository, SqliteRecordRepository,
    };
    use std::io::Cursor;

    const ADD_ALICE: &str =
        "add n/Alice Tan i/S1234567A p/91234567 e/alice@example.com a/1 Main Street\n";

    fn run_script(script: &str) -> (Interpreter, String, String, usize) {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteRecordRepository::try_new(&conn).unwrap();
        let mut interpreter = Interpreter::default();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(&mut interpreter, &repo, &mut input, &mut out, &mut err).unwrap();
        let saved_persons = repo.load_book().unwrap().len();
        (
            interpreter,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            saved_persons,
        )
    }

    fn alice() -> IdentityNumber {
        IdentityNumber::parse("S1234567A").unwrap()
    }

    #[test]
    fn multi_line_entry_is_submitted_with_newlines() {
        let script = format!("{ADD_ALICE}addlog i/S1234567A d/2024-01-31\nfirst\n\nthird\n.\nexit\n");
        let (interpreter, out, err, saved) = run_script(&script);

        assert!(err.is_empty(), "unexpected errors: {err}");
        assert!(out.contains("End with `.`"));
        let logs = interpreter.model().logs_for(&alice()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].body().as_str(), "first\n\nthird");
        assert_eq!(saved, 1);
    }

    #[test]
    fn cancel_and_end_of_input_discard_the_entry() {
        let script = format!("{ADD_ALICE}addlog i/S1234567A d/2024-01-31\ndraft\n:cancel\naddlog i/S1234567A d/2024-02-01\nunfinished");
        let (interpreter, out, err, _) = run_script(&script);

        assert!(err.is_empty(), "unexpected errors: {err}");
        assert!(out.contains("Log entry cancelled."));
        assert!(interpreter.model().logs_for(&alice()).unwrap().is_empty());
    }

    #[test]
    fn errors_go_to_stderr_and_blank_lines_are_skipped() {
        let (_, out, err, saved) = run_script("\n   \nfrobnicate\nlogs S7654321B\n");

        assert_eq!(err.lines().count(), 2);
        assert!(err.contains("frobnicate"));
        assert!(err.contains("S7654321B"));
        assert_eq!(out.matches("> ").count(), 5);
        assert_eq!(saved, 0);
    }

    #[test]
    fn logs_are_rendered_oldest_first() {
        let script = format!(
            "{ADD_ALICE}addlog i/S1234567A d/2024-01-01 l/A\naddlog i/S1234567A d/2023-06-01 l/B\nlogs s1234567a\n"
        );
        let (_, out, err, _) = run_script(&script);

        assert!(err.is_empty(), "unexpected errors: {err}");
        let first = out.find("1. 2024-01-01").unwrap();
        let second = out.find("2. 2023-06-01").unwrap();
        assert!(first < second);
    }
}
