use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_cli::commands::{add, remove, show, status};
use tally_cli::{Cli, Commands, Config, Outcome};
use tally_core::{RecordId, Tracker};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(tally_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = tally_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let now = Local::now().fixed_offset();
    let today = now.date_naive();
    let mut stdout = io::stdout().lock();

    let outcome = match &cli.command {
        Some(Commands::Add { category }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let mut tracker = Tracker::with_selected_date(db, Some(today));
            add::run(&mut stdout, &mut tracker, *category, now)?
        }
        Some(Commands::Show { date, all, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let selected = if *all { None } else { Some(date.unwrap_or(today)) };
            let mut tracker = Tracker::with_selected_date(db, selected);
            show::run(&mut stdout, &mut tracker, selected, *json, today)?
        }
        Some(Commands::Remove { id }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let mut tracker = Tracker::with_selected_date(db, Some(today));
            remove::run(&mut stdout, &mut tracker, RecordId::new(*id), today)?
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &db, &config.database_path)?
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Outcome::Done
        }
    };

    match outcome {
        Outcome::Done => Ok(ExitCode::SUCCESS),
        Outcome::Failed(notification) => {
            eprintln!("{notification}");
            Ok(ExitCode::FAILURE)
        }
    }
}
