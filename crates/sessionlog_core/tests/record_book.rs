use serde_json::json;
use sessionlog_core::{
    Address, AppointmentDate, Email, IdentityNumber, LogBody, LogEntry, Model, ModelError, Name,
    NameKeywords, Person, Phone, RecordBook,
};

fn person(name: &str, identity: &str) -> Person {
    Person::new(
        Name::parse(name).unwrap(),
        IdentityNumber::parse(identity).unwrap(),
        Phone::parse("91234567").unwrap(),
        Email::parse("someone@example.com").unwrap(),
        Address::parse("1 Main Street").unwrap(),
    )
}

fn entry(identity: &str, date: &str, body: &str) -> LogEntry {
    LogEntry::new(
        IdentityNumber::parse(identity).unwrap(),
        AppointmentDate::parse(date).unwrap(),
        LogBody::parse(body).unwrap(),
    )
}

#[test]
fn from_persons_rejects_repeated_identity_numbers() {
    let err = RecordBook::from_persons(vec![
        person("Alice", "S1234567A"),
        person("Alias", "s1234567a"),
    ])
    .unwrap_err();
    assert!(matches!(err, ModelError::DuplicatePerson(_)));
}

#[test]
fn append_and_remove_follow_identity_numbers() {
    let mut model = Model::new(RecordBook::new());
    model.add_person(person("Alice", "S1234567A")).unwrap();

    model
        .append_log(entry("S1234567A", "2024-01-01", "first"))
        .unwrap();
    let err = model
        .append_log(entry("T0000000Z", "2024-01-01", "orphan"))
        .unwrap_err();
    assert!(matches!(err, ModelError::SubjectNotFound(_)));

    let alice = IdentityNumber::parse("S1234567A").unwrap();
    let removed = model.delete_person(&alice).unwrap();
    assert_eq!(removed.logs().len(), 1);
    assert!(!model.has_person(&alice));
    assert!(matches!(
        model.logs_for(&alice),
        Err(ModelError::SubjectNotFound(_))
    ));
}

#[test]
fn name_keywords_match_whole_words_case_insensitively() {
    let keywords = NameKeywords::new(vec!["TAN".to_string()]);
    assert!(keywords.matches(&person("Alice Tan", "S1234567A")));
    assert!(!keywords.matches(&person("Alice Tanaka", "S1234567B")));
}

#[test]
fn book_serializes_to_a_stable_shape() {
    let mut book = RecordBook::new();
    book.add_person(person("Alice Tan", "S1234567A")).unwrap();
    book.append_log(entry("S1234567A", "2024-02-29", "line one\\nline two"))
        .unwrap();

    let value = serde_json::to_value(&book).unwrap();
    let stored = &value["persons"][0];
    assert_eq!(stored["name"], json!("Alice Tan"));
    assert_eq!(stored["identity_number"], json!("S1234567A"));
    assert_eq!(stored["logs"][0]["date"], json!("2024-02-29"));
    assert_eq!(stored["logs"][0]["body"], json!("line one\nline two"));

    let restored: RecordBook = serde_json::from_value(value).unwrap();
    assert_eq!(restored, book);
}

fn stored_person(identity: &str, log_identity: Option<&str>) -> serde_json::Value {
    let logs = match log_identity {
        Some(owner) => json!([{
            "id": "00000000-0000-4000-8000-000000000001",
            "identity_number": owner,
            "date": "2024-01-01",
            "body": "note"
        }]),
        None => json!([]),
    };
    json!({
        "name": "Alice Tan",
        "identity_number": identity,
        "phone": "91234567",
        "email": "alice@example.com",
        "address": "1 Main Street",
        "logs": logs
    })
}

#[test]
fn deserialized_book_rejects_repeated_identity_numbers() {
    let value = json!({
        "persons": [stored_person("S1234567A", None), stored_person("s1234567a", None)]
    });
    let err = serde_json::from_value::<RecordBook>(value).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn deserialized_person_rejects_logs_of_another_subject() {
    let value = json!({ "persons": [stored_person("S1234567A", Some("T7654321Z"))] });
    assert!(serde_json::from_value::<RecordBook>(value).is_err());

    let value = json!({ "persons": [stored_person("S1234567A", Some("s1234567a"))] });
    let book = serde_json::from_value::<RecordBook>(value).unwrap();
    assert_eq!(book.persons()[0].logs().len(), 1);
}

#[test]
fn deserialization_uses_the_default_identity_rule() {
    let value = json!({ "persons": [stored_person("P0042", None)] });
    assert!(serde_json::from_value::<RecordBook>(value).is_err());
}

#[test]
fn deserialization_validates_fields() {
    let bad_date = json!("2023-02-29");
    assert!(serde_json::from_value::<AppointmentDate>(bad_date).is_err());

    let lower = serde_json::from_value::<IdentityNumber>(json!("s1234567a")).unwrap();
    assert_eq!(lower.as_str(), "S1234567A");

    let body = serde_json::from_value::<LogBody>(json!("kept \\n literally\nand split")).unwrap();
    assert_eq!(body.as_str(), "kept \\n literally\nand split");
}
