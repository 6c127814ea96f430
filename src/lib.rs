//! sweldo library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg),
        Commands::Clock { .. } => cli::commands::clock::handle(&cli.command, cfg),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Archive { .. } => cli::commands::archive::handle(&cli.command, cfg),
        Commands::Rate { .. } => cli::commands::rate::handle(&cli.command, cfg),
        Commands::Advance { .. } => cli::commands::advance::handle(&cli.command, cfg),
        Commands::Payroll { .. } => cli::commands::payroll::handle(&cli.command, cfg),
        Commands::Autoclose { .. } => cli::commands::autoclose::handle(&cli.command, cfg),
        Commands::Backfill => cli::commands::backfill::handle(cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once, then apply the command-line DB override.
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db);
    }

    dispatch(&cli, &cfg)
}
