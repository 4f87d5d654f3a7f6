//! Record book and the model mutation surface.
//!
//! # Responsibility
//! - Own every person record and their logs in memory.
//! - Expose the query/mutation operations commands execute against.
//!
//! # Invariants
//! - Identity numbers are unique across the book.
//! - Every mutation is a single in-memory step: it either fully happens or
//!   returns an error before touching state.
//! - Log queries always search the full book, never the displayed subset.

use crate::model::identity::IdentityNumber;
use crate::model::index::Index;
use crate::model::log::LogEntry;
use crate::model::person::Person;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ModelResult<T> = Result<T, ModelError>;

/// Model-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No person carries this identity number.
    SubjectNotFound(IdentityNumber),
    /// A person with this identity number already exists.
    DuplicatePerson(IdentityNumber),
    /// Index points past the displayed list.
    IndexOutOfRange { index: Index, len: usize },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubjectNotFound(id) => write!(f, "no person found with identity number {id}"),
            Self::DuplicatePerson(id) => {
                write!(f, "a person with identity number {id} already exists")
            }
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "index {index} is out of range; {len} person(s) currently listed"
            ),
        }
    }
}

impl Error for ModelError {}

/// Ordered collection of persons with unique identity numbers.
///
/// Deserialization goes through `from_persons` and checks identity numbers
/// against the default pattern only. Books kept under a custom
/// `identity_pattern` load through `SqliteRecordRepository::with_identity_pattern`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredBook")]
pub struct RecordBook {
    persons: Vec<Person>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredBook {
    persons: Vec<Person>,
}

impl TryFrom<StoredBook> for RecordBook {
    type Error = ModelError;

    fn try_from(value: StoredBook) -> Result<Self, Self::Error> {
        Self::from_persons(value.persons)
    }
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from loaded records, rejecting duplicate identities.
    pub fn from_persons(persons: Vec<Person>) -> ModelResult<Self> {
        let mut book = Self::new();
        for person in persons {
            book.add_person(person)?;
        }
        Ok(book)
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn has_person(&self, identity_number: &IdentityNumber) -> bool {
        self.find_person(identity_number).is_some()
    }

    pub fn find_person(&self, identity_number: &IdentityNumber) -> Option<&Person> {
        self.persons
            .iter()
            .find(|person| person.identity_number() == identity_number)
    }

    pub fn add_person(&mut self, person: Person) -> ModelResult<()> {
        if self.persons.iter().any(|existing| existing.is_same_person(&person)) {
            return Err(ModelError::DuplicatePerson(person.identity_number().clone()));
        }
        self.persons.push(person);
        Ok(())
    }

    pub fn remove_person(&mut self, identity_number: &IdentityNumber) -> ModelResult<Person> {
        let position = self
            .persons
            .iter()
            .position(|person| person.identity_number() == identity_number)
            .ok_or_else(|| ModelError::SubjectNotFound(identity_number.clone()))?;
        Ok(self.persons.remove(position))
    }

    pub fn append_log(&mut self, entry: LogEntry) -> ModelResult<()> {
        let person = self
            .persons
            .iter_mut()
            .find(|person| person.identity_number() == entry.identity_number())
            .ok_or_else(|| ModelError::SubjectNotFound(entry.identity_number().clone()))?;
        person.push_log(entry);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.persons.clear();
    }
}

/// Case-insensitive whole-word match against person names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKeywords(Vec<String>);

impl NameKeywords {
    pub fn new(keywords: Vec<String>) -> Self {
        Self(keywords)
    }

    pub fn matches(&self, person: &Person) -> bool {
        person.name().as_str().split_whitespace().any(|word| {
            self.0
                .iter()
                .any(|keyword| word.to_lowercase() == keyword.to_lowercase())
        })
    }
}

/// In-memory model: the record book plus the displayed-person filter.
#[derive(Debug, Clone, Default)]
pub struct Model {
    book: RecordBook,
    filter: Option<NameKeywords>,
}

impl Model {
    pub fn new(book: RecordBook) -> Self {
        Self { book, filter: None }
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }

    pub fn into_book(self) -> RecordBook {
        self.book
    }

    pub fn find_person(&self, identity_number: &IdentityNumber) -> Option<&Person> {
        self.book.find_person(identity_number)
    }

    pub fn has_person(&self, identity_number: &IdentityNumber) -> bool {
        self.book.has_person(identity_number)
    }

    pub fn add_person(&mut self, person: Person) -> ModelResult<()> {
        self.book.add_person(person)
    }

    pub fn delete_person(&mut self, identity_number: &IdentityNumber) -> ModelResult<Person> {
        self.book.remove_person(identity_number)
    }

    /// Appends a log to the person named by the entry's identity number.
    pub fn append_log(&mut self, entry: LogEntry) -> ModelResult<()> {
        self.book.append_log(entry)
    }

    /// Returns a person's logs, oldest first.
    pub fn logs_for(&self, identity_number: &IdentityNumber) -> ModelResult<&[LogEntry]> {
        self.book
            .find_person(identity_number)
            .map(Person::logs)
            .ok_or_else(|| ModelError::SubjectNotFound(identity_number.clone()))
    }

    /// Restricts displayed persons; `None` shows everyone.
    pub fn update_person_filter(&mut self, filter: Option<NameKeywords>) {
        self.filter = filter;
    }

    pub fn person_filter(&self) -> Option<&NameKeywords> {
        self.filter.as_ref()
    }

    pub fn displayed_persons(&self) -> Vec<&Person> {
        self.book
            .persons()
            .iter()
            .filter(|person| {
                self.filter
                    .as_ref()
                    .map_or(true, |filter| filter.matches(person))
            })
            .collect()
    }

    /// Resolves an index into the displayed list.
    pub fn displayed_person(&self, index: Index) -> ModelResult<&Person> {
        let displayed = self.displayed_persons();
        let len = displayed.len();
        displayed
            .get(index.zero_based())
            .copied()
            .ok_or(ModelError::IndexOutOfRange { index, len })
    }

    pub fn clear(&mut self) {
        self.book.clear();
    }
}
