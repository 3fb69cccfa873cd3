//! # powerlog — appliance usage calculator
//!
//! Composition root that wires the JSON profile adapter into the usage
//! service and prints results.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and command-line arguments
//! - Initialize logging
//! - Construct the profile source adapter and the application service
//! - Print the result as JSON on stdout, failures on stderr
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;
mod json_file;

use std::process::ExitCode;

use powerlog_app::services::usage_service::UsageService;

use crate::cli::Invocation;
use crate::json_file::JsonFileProfileSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match config::Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("powerlog: {err}");
            return ExitCode::from(2);
        }
    };

    let filter = match config.logging.env_filter() {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("powerlog: {err}");
            return ExitCode::from(2);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let invocation = match Invocation::parse(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("powerlog: {err}\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let source = JsonFileProfileSource::new(&invocation.profile);
    let service = UsageService::new(source, config.period);

    match cli::run(&service, &invocation.command).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let kind = cli::error_kind(&err).unwrap_or("internal");
            tracing::warn!(kind, error = %err, "computation failed");
            eprintln!("powerlog: [{kind}] {err:#}");
            ExitCode::FAILURE
        }
    }
}
