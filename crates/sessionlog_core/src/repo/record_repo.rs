//! Record book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load the full record book at startup.
//! - Save the full record book after committed cycles.
//!
//! # Invariants
//! - Person order and per-person log order survive a save/load round trip.
//! - Invalid persisted data is reported, never silently dropped.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::book::RecordBook;
use crate::model::field::FieldError;
use crate::model::identity::{IdentityNumber, IdentityPattern};
use crate::model::log::{AppointmentDate, LogBody, LogEntry};
use crate::model::person::{Address, Email, Name, Person, Phone};
use log::info;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record book persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection schema is not at the version this build writes.
    SchemaMismatch { found: u32, expected: u32 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaMismatch { found, expected } => write!(
                f,
                "record store schema version {found} does not match expected {expected}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaMismatch { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save hooks around the in-memory record book.
pub trait RecordRepository {
    fn load_book(&self) -> RepoResult<RecordBook>;
    fn save_book(&self, book: &RecordBook) -> RepoResult<()>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
    identity_pattern: IdentityPattern,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::SchemaMismatch` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = schema_version(conn)?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaMismatch { found, expected });
        }
        Ok(Self {
            conn,
            identity_pattern: IdentityPattern::default(),
        })
    }

    /// Validates loaded identity numbers with `pattern` instead of the default.
    pub fn with_identity_pattern(mut self, pattern: IdentityPattern) -> Self {
        self.identity_pattern = pattern;
        self
    }

    fn load_logs(&self) -> RepoResult<HashMap<IdentityNumber, Vec<LogEntry>>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, identity_number, appointment_date, body
             FROM session_logs
             ORDER BY identity_number ASC, position ASC;",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut logs: HashMap<IdentityNumber, Vec<LogEntry>> = HashMap::new();
        for (uuid_text, identity_text, date_text, body_text) in rows {
            let id = Uuid::parse_str(&uuid_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid uuid value `{uuid_text}` in session_logs.uuid"
                ))
            })?;
            let identity_number = checked(
                "session_logs.identity_number",
                IdentityNumber::parse_with(&identity_text, &self.identity_pattern),
            )?;
            let date = checked(
                "session_logs.appointment_date",
                AppointmentDate::parse(&date_text),
            )?;
            let body = checked("session_logs.body", LogBody::try_from(body_text))?;
            logs.entry(identity_number.clone())
                .or_default()
                .push(LogEntry::with_id(id, identity_number, date, body));
        }
        Ok(logs)
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn load_book(&self) -> RepoResult<RecordBook> {
        let started_at = Instant::now();
        let mut logs = self.load_logs()?;

        let mut stmt = self.conn.prepare(
            "SELECT identity_number, name, phone, email, address
             FROM persons
             ORDER BY position ASC;",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut persons = Vec::with_capacity(rows.len());
        let mut log_count = 0;
        for (identity_text, name, phone, email, address) in rows {
            let identity_number = checked(
                "persons.identity_number",
                IdentityNumber::parse_with(&identity_text, &self.identity_pattern),
            )?;
            let mut person = Person::new(
                checked("persons.name", Name::parse(&name))?,
                identity_number,
                checked("persons.phone", Phone::parse(&phone))?,
                checked("persons.email", Email::parse(&email))?,
                checked("persons.address", Address::parse(&address))?,
            );
            for entry in logs.remove(person.identity_number()).unwrap_or_default() {
                person.push_log(entry);
                log_count += 1;
            }
            persons.push(person);
        }

        if let Some(orphan) = logs.keys().next() {
            return Err(RepoError::InvalidData(format!(
                "session logs reference unknown person {orphan}"
            )));
        }

        let book = RecordBook::from_persons(persons)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        info!(
            "event=book_load module=repo status=ok persons={} logs={} duration_ms={}",
            book.len(),
            log_count,
            started_at.elapsed().as_millis()
        );
        Ok(book)
    }

    fn save_book(&self, book: &RecordBook) -> RepoResult<()> {
        let started_at = Instant::now();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM session_logs;", [])?;
        tx.execute("DELETE FROM persons;", [])?;

        let mut log_count = 0;
        {
            let mut insert_person = tx.prepare(
                "INSERT INTO persons (identity_number, position, name, phone, email, address)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            let mut insert_log = tx.prepare(
                "INSERT INTO session_logs (uuid, identity_number, position, appointment_date, body)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;

            for (position, person) in book.persons().iter().enumerate() {
                insert_person.execute(params![
                    person.identity_number().as_str(),
                    position as i64,
                    person.name().as_str(),
                    person.phone().as_str(),
                    person.email().as_str(),
                    person.address().as_str(),
                ])?;
                for (log_position, entry) in person.logs().iter().enumerate() {
                    insert_log.execute(params![
                        entry.id().to_string(),
                        person.identity_number().as_str(),
                        log_position as i64,
                        entry.date().to_string(),
                        entry.body().as_str(),
                    ])?;
                    log_count += 1;
                }
            }
        }
        tx.commit()?;

        info!(
            "event=book_save module=repo status=ok persons={} logs={} duration_ms={}",
            book.len(),
            log_count,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn checked<T>(column: &str, parsed: Result<T, FieldError>) -> RepoResult<T> {
    parsed.map_err(|err| RepoError::InvalidData(format!("{err} in {column}")))
}
