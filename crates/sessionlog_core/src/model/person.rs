//! Person record and its contact fields.

use crate::model::field::FieldError;
use crate::model::identity::IdentityNumber;
use crate::model::log::LogEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Alphabetic}\p{Nd}][\p{Alphabetic}\p{Nd} ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+(?:[+_.-][A-Za-z0-9]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)*[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$",
    )
    .expect("valid email regex")
});

/// Display name of a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(FieldError::new(
                "name",
                trimmed,
                "names contain only letters, digits and spaces, and must not be blank",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Contact number, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(FieldError::new(
                "phone",
                trimmed,
                "phone numbers contain only digits and are at least 3 digits long",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        let domain_ok = trimmed
            .rsplit_once('@')
            .and_then(|(_, domain)| domain.rsplit('.').next())
            .is_some_and(|label| label.len() >= 2);
        if !EMAIL_RE.is_match(trimmed) || !domain_ok {
            return Err(FieldError::new(
                "email",
                trimmed,
                "emails look like local-part@domain; the local part uses letters and digits separated by single + _ . - characters, and the last domain label has at least 2 characters",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Postal address, any non-blank text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new("address", trimmed, "addresses must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! string_conversions {
    ($($ty:ident),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = FieldError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::parse(&value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }
        )*
    };
}

string_conversions!(Name, Phone, Email, Address);

/// Subject record keyed by identity number.
///
/// # Invariants
/// - `logs` is ordered oldest first.
/// - Every log carries this person's identity number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPerson")]
pub struct Person {
    name: Name,
    identity_number: IdentityNumber,
    phone: Phone,
    email: Email,
    address: Address,
    logs: Vec<LogEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredPerson {
    name: Name,
    identity_number: IdentityNumber,
    phone: Phone,
    email: Email,
    address: Address,
    logs: Vec<LogEntry>,
}

impl TryFrom<StoredPerson> for Person {
    type Error = FieldError;

    fn try_from(value: StoredPerson) -> Result<Self, Self::Error> {
        if let Some(foreign) = value
            .logs
            .iter()
            .find(|entry| entry.identity_number() != &value.identity_number)
        {
            return Err(FieldError::new(
                "identity number",
                foreign.identity_number().as_str(),
                format!("session logs must belong to {}", value.identity_number),
            ));
        }
        Ok(Self {
            name: value.name,
            identity_number: value.identity_number,
            phone: value.phone,
            email: value.email,
            address: value.address,
            logs: value.logs,
        })
    }
}

impl Person {
    /// Creates a person with no logs.
    pub fn new(
        name: Name,
        identity_number: IdentityNumber,
        phone: Phone,
        email: Email,
        address: Address,
    ) -> Self {
        Self {
            name,
            identity_number,
            phone,
            email,
            address,
            logs: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn identity_number(&self) -> &IdentityNumber {
        &self.identity_number
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Logs in insertion order, oldest first.
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Two records describe the same subject when identity numbers match.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.identity_number == other.identity_number
    }

    /// Appends a log. Callers must pass an entry for this person.
    pub(crate) fn push_log(&mut self, entry: LogEntry) {
        debug_assert_eq!(entry.identity_number(), &self.identity_number);
        self.logs.push(entry);
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Identity Number: {}; Phone: {}; Email: {}; Address: {}",
            self.name, self.identity_number, self.phone, self.email, self.address
        )
    }
}
