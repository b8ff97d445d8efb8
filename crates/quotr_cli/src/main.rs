//! quotr command-line entry point.
//!
//! # Responsibility
//! - Parse configuration, start logging and open the catalog database.
//! - Resolve `--user` to a principal and run one catalog command.
//! - Map catalog errors to stable exit codes.

mod commands;
mod config;
mod render;

use clap::Parser;
use commands::SignInRequired;
use config::Cli;
use log::error;
use quotr_core::db::open_db;
use quotr_core::{default_log_level, init_logging, CatalogError};
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_SIGN_IN_REQUIRED: u8 = 3;
const EXIT_NOT_FOUND: u8 = 4;
const EXIT_INVALID_INPUT: u8 = 5;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db).map_err(|err| {
        error!("event=cli_start module=cli status=error error_code=db_open_failed");
        anyhow::Error::new(err).context(format!("failed to open {}", cli.db.display()))
    })?;

    commands::run(&conn, cli.user.as_deref(), cli.json, cli.command)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<SignInRequired>().is_some() {
        return EXIT_SIGN_IN_REQUIRED;
    }
    match err.downcast_ref::<CatalogError>() {
        Some(CatalogError::NotFound(_)) => EXIT_NOT_FOUND,
        Some(CatalogError::Validation(_)) => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}
