//! Session log command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from an optional JSON file and flags.
//! - Bootstrap logging and storage, then hand stdin to the read loop.
//!
//! # Invariants
//! - Flags override config file values.
//! - Bootstrap failures exit non-zero before any input is read.

mod repl;

use clap::Parser;
use log::info;
use sessionlog_core::db::open_db;
use sessionlog_core::{
    init_logging, AppConfig, Interpreter, Model, RecordRepository, SqliteRecordRepository,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sessionlog", version, about = "Record persons and their session logs")]
struct Cli {
    /// JSON config file (log_level, log_dir, data_file, identity_pattern)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// SQLite file holding the record book
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// One of trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Identity number regex (default: NRIC structure)
    #[arg(long, value_name = "REGEX")]
    identity_pattern: Option<String>,
}

impl Cli {
    fn resolve_config(self) -> Result<AppConfig, String> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path).map_err(|err| err.to_string())?,
            None => AppConfig::default(),
        };
        if let Some(data_file) = self.data_file {
            config.data_file = data_file;
        }
        if let Some(log_dir) = self.log_dir {
            config.log_dir = Some(log_dir);
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if let Some(identity_pattern) = self.identity_pattern {
            config.identity_pattern = Some(identity_pattern);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("sessionlog: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = cli.resolve_config()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).map_err(|err| err.to_string())?;
    }
    let interpreter_config = config
        .interpreter_config()
        .map_err(|err| err.to_string())?;

    let conn = open_db(&config.data_file).map_err(|err| err.to_string())?;
    let repo = SqliteRecordRepository::try_new(&conn)
        .map_err(|err| err.to_string())?
        .with_identity_pattern(interpreter_config.identity_pattern.clone());
    let book = repo.load_book().map_err(|err| err.to_string())?;

    let mut interpreter = Interpreter::new(Model::new(book), interpreter_config);
    let stdin = std::io::stdin();
    repl::run(
        &mut interpreter,
        &repo,
        &mut stdin.lock(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .map_err(|err| format!("terminal i/o failed: {err}"))?;

    info!(
        "event=session_end module=cli status=ok persons={}",
        interpreter.model().book().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sessionlog.json");
        std::fs::write(
            &config_path,
            r#"{"log_level": "warn", "data_file": "from-file.sqlite3"}"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "sessionlog",
            "--config",
            config_path.to_str().unwrap(),
            "--data-file",
            "from-flag.sqlite3",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.data_file, PathBuf::from("from-flag.sqlite3"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["sessionlog", "--config", "/nonexistent/sessionlog.json"]);
        assert!(cli.resolve_config().is_err());
    }
}
