mod cli;
mod commands;
mod observability;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use output::print_error;
use warden_config::settings::loader::load_config;

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Load .env file if present; a missing file is not an error
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    observability::init_tracing(&cfg.logging.level);

    let users = cli
        .users
        .clone()
        .unwrap_or_else(|| cfg.internal_users.path.clone());
    let format = cli.format.unwrap_or_default();

    tracing::debug!(users = %users.display(), "Using internal users file");

    match &cli.command {
        Commands::Check(args) => commands::check(&users, &args.identity, format)?,
        Commands::Exists(args) => commands::exists(&users, &args.identity, format)?,
        Commands::Roles(args) => commands::roles(&users, &args.identity, format)?,
        Commands::Validate => commands::validate(&users, format)?,
    }

    Ok(())
}
