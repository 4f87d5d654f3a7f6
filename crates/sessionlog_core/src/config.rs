//! Application and interpreter configuration.
//!
//! # Responsibility
//! - Load bootstrap settings from an optional JSON file.
//! - Build the interpreter configuration with a validated identity rule.
//!
//! # Invariants
//! - Unknown keys in the config file are rejected.
//! - Missing keys fall back to defaults.

use crate::logging::default_log_level;
use crate::model::identity::{IdentityPattern, PatternError};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default SQLite file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "sessionlog.sqlite3";

/// Settings consumed by the parsing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Structural rule applied to every identity number field.
    pub identity_pattern: IdentityPattern,
}

/// Bootstrap settings read by the executable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; logging is off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite file holding the record book.
    pub data_file: PathBuf,
    /// Identity number regex; the NRIC rule is used when unset.
    pub identity_pattern: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            identity_pattern: None,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parses config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Builds interpreter settings, compiling the identity pattern.
    pub fn interpreter_config(&self) -> Result<InterpreterConfig, ConfigError> {
        let identity_pattern = match self.identity_pattern.as_deref() {
            Some(pattern) => IdentityPattern::new(pattern).map_err(ConfigError::IdentityPattern)?,
            None => IdentityPattern::default(),
        };
        Ok(InterpreterConfig { identity_pattern })
    }
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    IdentityPattern(PatternError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid config `{}`: {source}", path.display()),
            Self::Parse { path: None, source } => write!(f, "invalid config: {source}"),
            Self::IdentityPattern(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::IdentityPattern(err) => Some(err),
        }
    }
}
