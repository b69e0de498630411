//! `vocab` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, logging and the database connection.
//! - Dispatch one subcommand to the matching core use case.

mod commands;
mod handlers;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Cli, Commands};
use handlers::Output;
use log::info;
use std::process::ExitCode;
use vocab_core::{
    db::open_db, init_logging, load_config, AppConfig, DictionaryClient, HttpDictionaryClient,
    OfflineDictionary,
};

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let mut conn = open_db(&config.database_path).with_context(|| {
        format!(
            "failed to open database {}",
            config.database_path.display()
        )
    })?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        vocab_core::core_version()
    );

    let out = Output { json: cli.json };
    match cli.command {
        Commands::Teacher(command) => handlers::teacher(&conn, command, out),
        Commands::Student(command) => handlers::student(&conn, command, out),
        Commands::Unit(command) => handlers::unit(&mut conn, command, out),
        Commands::Word(command) => {
            let dictionary = build_dictionary(&config, cli.offline)?;
            handlers::word(&mut conn, dictionary, command, out)
        }
    }
}

fn build_dictionary(config: &AppConfig, offline: bool) -> Result<Box<dyn DictionaryClient>> {
    if offline {
        return Ok(Box::new(OfflineDictionary));
    }
    let client = HttpDictionaryClient::from_config(&config.dictionary).context(
        "dictionary is not usable; set VOCAB_DICTIONARY__API_KEY or pass --offline",
    )?;
    Ok(Box::new(client))
}
