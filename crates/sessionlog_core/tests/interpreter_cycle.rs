use sessionlog_core::model::log::encode_newlines;
use sessionlog_core::{
    CommandResult, CycleOutcome, EntryResponse, ErrorKind, IdentityNumber, IdentityPattern,
    Interpreter, InterpreterConfig, LogEntry, PendingEntry, UiDirective,
};

const ALICE: &str = "add n/Alice Tan i/S1234567A p/91234567 e/alice@example.com a/1 Main Street";
const BOB: &str = "add n/Bob Lim i/T7654321Z p/98765432 e/bob@example.org a/2 Side Road";

fn interpreter_with(lines: &[&str]) -> Interpreter {
    let mut interpreter = Interpreter::default();
    for line in lines {
        completed(interpreter.submit(line).unwrap());
    }
    interpreter
}

fn completed(outcome: CycleOutcome) -> CommandResult {
    match outcome {
        CycleOutcome::Completed(result) => result,
        other => panic!("expected a completed cycle, got {other:?}"),
    }
}

fn awaiting(outcome: CycleOutcome) -> PendingEntry {
    match outcome {
        CycleOutcome::AwaitingEntry(pending) => pending,
        other => panic!("expected a suspended cycle, got {other:?}"),
    }
}

fn id(value: &str) -> IdentityNumber {
    IdentityNumber::parse(value).unwrap()
}

fn logs_of(interpreter: &Interpreter, identity: &str) -> Vec<LogEntry> {
    interpreter.model().logs_for(&id(identity)).unwrap().to_vec()
}

fn bodies(entries: &[LogEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.body().as_str()).collect()
}

#[test]
fn add_log_appends_after_existing_entries() {
    let mut interpreter = interpreter_with(&[
        ALICE,
        "addlog i/S1234567A d/2024-03-01 l/A",
        "addlog i/S1234567A d/2024-01-01 l/B",
    ]);

    completed(
        interpreter
            .submit("addlog i/S1234567A d/2023-12-31 l/C")
            .unwrap(),
    );

    assert_eq!(bodies(&logs_of(&interpreter, "S1234567A")), ["A", "B", "C"]);
}

#[test]
fn logs_command_lists_entries_oldest_first() {
    let mut interpreter = interpreter_with(&[
        ALICE,
        BOB,
        "addlog i/S1234567A d/2024-01-01 l/A",
        "addlog i/T7654321Z d/2024-01-02 l/other person",
        "addlog i/S1234567A d/2024-01-03 l/B",
        "addlog i/S1234567A d/2024-01-04 l/C",
    ]);

    let result = completed(interpreter.submit("logs S1234567A").unwrap());
    match result.directive() {
        Some(UiDirective::ShowLogs {
            identity_number,
            entries,
        }) => {
            assert_eq!(identity_number, &id("S1234567A"));
            assert_eq!(bodies(entries), ["A", "B", "C"]);
        }
        other => panic!("expected ShowLogs, got {other:?}"),
    }
}

#[test]
fn logs_query_ignores_the_name_filter() {
    let mut interpreter = interpreter_with(&[
        ALICE,
        BOB,
        "addlog i/S1234567A d/2024-01-01 l/A",
        "find Bob",
    ]);
    assert_eq!(interpreter.model().displayed_persons().len(), 1);

    let result = completed(interpreter.submit("logs S1234567A").unwrap());
    assert!(matches!(
        result.directive(),
        Some(UiDirective::ShowLogs { entries, .. }) if entries.len() == 1
    ));
}

#[test]
fn unknown_subject_is_reported_for_logs_and_addlog() {
    let mut interpreter = interpreter_with(&[ALICE]);

    let err = interpreter.submit("logs S0000000A").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SubjectNotFound);

    let err = interpreter
        .submit("addlog i/S0000000A d/2024-01-01 l/orphan")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SubjectNotFound);
    assert!(logs_of(&interpreter, "S1234567A").is_empty());
}

#[test]
fn repeated_single_valued_prefix_is_a_duplicate_field() {
    let mut interpreter = interpreter_with(&[ALICE]);

    let err = interpreter
        .submit("addlog i/S1234567A i/S1234567A d/2024-01-01 l/x")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateField);

    let err = interpreter
        .submit("addlog i/S1234567A d/2024-01-01 d/2024-01-02 l/x l/y")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateField);
    assert!(err.to_string().contains("d/"));
    assert!(err.to_string().contains("l/"));
    assert!(logs_of(&interpreter, "S1234567A").is_empty());
}

#[test]
fn dates_follow_the_calendar() {
    let mut interpreter = interpreter_with(&[ALICE]);

    completed(
        interpreter
            .submit("addlog i/S1234567A d/2024-02-29 l/leap day")
            .unwrap(),
    );
    for bad in ["2023-02-29", "2024-02-30", "2024-13-01", "2024-1-01", "01-01-2024"] {
        let err = interpreter
            .submit(&format!("addlog i/S1234567A d/{bad} l/x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat, "date {bad}");
    }
    assert_eq!(logs_of(&interpreter, "S1234567A").len(), 1);
}

#[test]
fn identity_numbers_match_case_insensitively() {
    let mut interpreter = interpreter_with(&[ALICE]);

    completed(
        interpreter
            .submit("addlog i/s1234567a d/2024-01-01 l/lower case id")
            .unwrap(),
    );

    let entries = logs_of(&interpreter, "S1234567A");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].identity_number().as_str(), "S1234567A");
    let err = interpreter.submit(&ALICE.replace("S1234567A", "s1234567a")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicatePerson);
}

#[test]
fn inline_escapes_become_newlines() {
    let mut interpreter = interpreter_with(&[ALICE]);

    completed(
        interpreter
            .submit(r"addlog i/S1234567A d/2024-01-01 l/line one\nline two")
            .unwrap(),
    );

    assert_eq!(
        bodies(&logs_of(&interpreter, "S1234567A")),
        ["line one\nline two"]
    );
}

#[test]
fn entered_body_round_trips_through_suspend_and_resume() {
    let mut interpreter = interpreter_with(&[ALICE]);
    let body = "Slept poorly.\nMentioned i/ and d/ markers.\nPath C:\\notes\\new";

    let pending = awaiting(interpreter.submit("addlog i/s1234567a d/2024-05-06").unwrap());
    assert_eq!(pending.identity_number(), &id("S1234567A"));
    assert_eq!(pending.date().to_string(), "2024-05-06");

    completed(
        interpreter
            .resume(pending, EntryResponse::Submit(body.to_string()))
            .unwrap(),
    );

    assert_eq!(bodies(&logs_of(&interpreter, "S1234567A")), [body]);
}

#[test]
fn entered_body_keeps_indentation_and_trailing_newline() {
    let mut interpreter = interpreter_with(&[ALICE]);
    let body = "    - item one\n    - item two\n";

    let pending = awaiting(interpreter.submit("addlog i/S1234567A d/2024-05-06").unwrap());
    completed(
        interpreter
            .resume(pending, EntryResponse::Submit(body.to_string()))
            .unwrap(),
    );

    assert_eq!(bodies(&logs_of(&interpreter, "S1234567A")), [body]);
}

#[test]
fn encoded_inline_body_round_trips_exactly() {
    let mut interpreter = interpreter_with(&[ALICE]);
    let body = "first line\nsecond line\n";

    completed(
        interpreter
            .submit(&format!(
                "addlog i/S1234567A d/2024-05-06 l/{}",
                encode_newlines(body)
            ))
            .unwrap(),
    );

    assert_eq!(bodies(&logs_of(&interpreter, "S1234567A")), [body]);
}

#[test]
fn cancelled_entry_changes_nothing() {
    let mut interpreter = interpreter_with(&[ALICE, "addlog i/S1234567A d/2024-01-01 l/A"]);
    let before = interpreter.model().book().clone();

    let pending = awaiting(interpreter.submit("addlog i/S1234567A d/2024-01-02").unwrap());
    let outcome = interpreter.resume(pending, EntryResponse::Cancel).unwrap();

    assert!(matches!(outcome, CycleOutcome::Cancelled));
    assert_eq!(interpreter.model().book(), &before);
}

#[test]
fn blank_entered_body_is_rejected() {
    let mut interpreter = interpreter_with(&[ALICE]);

    let pending = awaiting(interpreter.submit("addlog i/S1234567A d/2024-01-02").unwrap());
    let err = interpreter
        .resume(pending, EntryResponse::Submit(" \n \n".to_string()))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat);
    assert!(logs_of(&interpreter, "S1234567A").is_empty());
}

#[test]
fn suspension_needs_valid_identity_and_date() {
    let mut interpreter = interpreter_with(&[ALICE]);

    let err = interpreter.submit("addlog i/S1234567A").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    let err = interpreter.submit("addlog i/S1234567A d/2024-02-30").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat);
    let err = interpreter.submit("addlog i/12345 d/2024-01-01").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat);
}

#[test]
fn unknown_word_and_bad_format_are_distinct() {
    let mut interpreter = Interpreter::default();

    assert_eq!(
        interpreter.submit("addlogs i/S1234567A").unwrap_err().kind(),
        ErrorKind::UnknownCommand
    );
    assert_eq!(
        interpreter.submit("ADDLOG i/S1234567A").unwrap_err().kind(),
        ErrorKind::UnknownCommand
    );
    assert_eq!(
        interpreter
            .submit("addlog stray i/S1234567A d/2024-01-01 l/x")
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidCommandFormat
    );
    assert_eq!(
        interpreter.submit("list everything").unwrap_err().kind(),
        ErrorKind::InvalidCommandFormat
    );
    assert_eq!(
        interpreter.submit("   ").unwrap_err().kind(),
        ErrorKind::InvalidCommandFormat
    );
}

#[test]
fn failed_add_leaves_the_book_untouched() {
    let mut interpreter = interpreter_with(&[ALICE]);
    let before = interpreter.model().book().clone();

    let err = interpreter
        .submit("add n/Carol i/G1111111X p/123 e/not-an-email a/3 Hill")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat);
    let err = interpreter
        .submit("add n/Carol i/G1111111X p/123 a/3 Hill")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);

    assert_eq!(interpreter.model().book(), &before);
}

#[test]
fn delete_uses_the_displayed_index() {
    let mut interpreter = interpreter_with(&[ALICE, BOB, "find bob"]);

    completed(interpreter.submit("delete 1").unwrap());
    let remaining: Vec<&str> = interpreter
        .model()
        .book()
        .persons()
        .iter()
        .map(|person| person.name().as_str())
        .collect();
    assert_eq!(remaining, ["Alice Tan"]);

    let err = interpreter.submit("delete 5").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIndex);
    let err = interpreter.submit("delete 0").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat);
}

#[test]
fn list_resets_the_filter_and_clear_empties_the_book() {
    let mut interpreter = interpreter_with(&[ALICE, BOB, "find alice"]);
    assert_eq!(interpreter.model().displayed_persons().len(), 1);

    completed(interpreter.submit("list").unwrap());
    assert_eq!(interpreter.model().displayed_persons().len(), 2);

    completed(interpreter.submit("clear").unwrap());
    assert!(interpreter.model().book().is_empty());
}

#[test]
fn help_and_exit_carry_directives() {
    let mut interpreter = Interpreter::default();

    assert!(completed(interpreter.submit("help").unwrap()).is_show_help());
    assert!(completed(interpreter.submit("exit").unwrap()).is_exit());
}

#[test]
fn delete_log_parses_but_is_not_implemented() {
    let mut interpreter = interpreter_with(&[ALICE, "addlog i/S1234567A d/2024-01-01 l/A"]);

    let err = interpreter.submit("deletelog 1 i/S1234567A").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert_eq!(logs_of(&interpreter, "S1234567A").len(), 1);

    let err = interpreter.submit("deletelog i/S1234567A").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCommandFormat);
}

#[test]
fn custom_identity_pattern_replaces_the_default_rule() {
    let config = InterpreterConfig {
        identity_pattern: IdentityPattern::new("P[0-9]{4}").unwrap(),
    };
    let mut interpreter = Interpreter::new(Default::default(), config);

    completed(
        interpreter
            .submit("add n/Dana i/p0042 p/555 e/dana@example.com a/4 Lane")
            .unwrap(),
    );
    let err = interpreter.submit(ALICE).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldFormat);
    assert!(interpreter
        .model()
        .book()
        .persons()
        .iter()
        .any(|person| person.identity_number().as_str() == "P0042"));
}
