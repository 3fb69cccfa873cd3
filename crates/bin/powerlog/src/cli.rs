//! Command-line parsing and dispatch.

use std::path::PathBuf;

use anyhow::Context;
use powerlog_app::ports::ProfileSource;
use powerlog_app::services::usage_service::UsageService;
use powerlog_domain::error::PowerLogError;
use serde_json::{Value, json};

pub const USAGE: &str = "usage: powerlog <profile.json> <usage|savings|day <n>|report>";

/// What to compute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Usage,
    Savings,
    /// Day number as typed; validated against the configured period.
    Day(String),
    Report,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub profile: PathBuf,
    pub command: Command,
}

/// Command-line misuse.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("missing profile path")]
    MissingProfile,
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("`day` requires a day number")]
    MissingDay,
    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
}

impl Invocation {
    /// Parse the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] when arguments are missing or unknown.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut args = args.into_iter();
        let profile = args.next().map(PathBuf::from).ok_or(CliError::MissingProfile)?;
        let command = match args.next().ok_or(CliError::MissingCommand)?.as_str() {
            "usage" => Command::Usage,
            "savings" => Command::Savings,
            "day" => Command::Day(args.next().ok_or(CliError::MissingDay)?),
            "report" => Command::Report,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        if let Some(extra) = args.next() {
            return Err(CliError::UnexpectedArgument(extra));
        }
        Ok(Self { profile, command })
    }
}

/// Run `command` and render its result as JSON.
///
/// # Errors
///
/// Returns the domain error (with context) when the computation fails.
pub async fn run<S: ProfileSource>(
    service: &UsageService<S>,
    command: &Command,
) -> anyhow::Result<Value> {
    let output = match command {
        Command::Usage => json!({ "minutes": service.usage().await.context("computing usage")? }),
        Command::Savings => {
            json!({ "minutes": service.savings().await.context("computing savings")? })
        }
        Command::Day(raw) => {
            let day = service
                .period()
                .parse_day(raw)
                .map_err(PowerLogError::from)?;
            let minutes = service
                .usage_for_day(i64::from(day))
                .await
                .with_context(|| format!("computing usage for day {day}"))?;
            json!({ "day": day, "minutes": minutes })
        }
        Command::Report => {
            let report = service.daily_usage().await.context("building daily report")?;
            serde_json::to_value(report)?
        }
    };
    Ok(output)
}

/// Stable kind of a failure returned by [`run`], when it comes from the domain.
#[must_use]
pub fn error_kind(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<PowerLogError>().map(PowerLogError::kind)
}
