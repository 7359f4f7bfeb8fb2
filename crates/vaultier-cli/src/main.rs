//! Vaultier CLI - manage hierarchical secrets in a versioned key-value store
//!
//! This is the command-line interface for Vaultier. It provides a thin
//! wrapper over the core traversal/migration engine.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod commands;

use app::AppContext;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let ctx = AppContext::new(&cli);
    match &cli.command {
        Commands::Get(args) => commands::handle_get(&ctx, args),
        Commands::Set(args) => commands::handle_set(&ctx, args),
        Commands::Add(args) => commands::handle_add(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::Destroy(args) => commands::handle_destroy(&ctx, args),
        Commands::Backup(args) => commands::handle_backup(&ctx, args),
        Commands::Migrate(args) => commands::handle_migrate(&ctx, args),
        Commands::MigrateAndDestroy(args) => commands::handle_migrate_and_destroy(&ctx, args),
        Commands::Completions { shell } => commands::handle_completions(*shell),
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level)
        .map_err(|e| anyhow::anyhow!("Invalid log level {}: {}", log_level, e))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
