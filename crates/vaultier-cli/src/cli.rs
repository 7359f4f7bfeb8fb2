use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use vaultier_core::VERSION;

/// Vaultier - manage hierarchical secrets in a versioned key-value store
#[derive(Parser)]
#[command(name = "vaultier")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the secret store
    #[arg(
        long,
        global = true,
        env = "VAULTIER_URL",
        default_value = "https://localhost:443/vault"
    )]
    pub vault_url: String,

    /// Store namespace
    #[arg(long, global = true, env = "VAULTIER_NAMESPACE", default_value = "test")]
    pub vault_namespace: String,

    /// Secrets engine mountpoint
    #[arg(
        long,
        global = true,
        env = "VAULTIER_MOUNTPOINT",
        default_value = "secrets"
    )]
    pub vault_mountpoint: String,

    /// Username for LDAP login
    #[arg(long, global = true, env = "USER")]
    pub username: Option<String>,

    /// Password for LDAP login (prompted when absent)
    #[arg(long, global = true, env = "VAULTIER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Store path to read, recursively
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Arguments for the `set` command
#[derive(Args)]
pub struct SetArgs {
    /// JSON file mapping path -> {name: value}
    #[arg(value_name = "JSONFILE")]
    pub jsonfile: String,

    /// Log the would-be new versions without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// JSON file mapping path -> {name: value}
    #[arg(value_name = "JSONFILE")]
    pub jsonfile: String,

    /// Log the would-be merged versions without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Store path; a single secret unless --recursive
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Log what would be deleted without mutating
    #[arg(long)]
    pub dry_run: bool,

    /// Allow deleting every secret under a folder path
    #[arg(long)]
    pub recursive: bool,
}

/// Arguments for the `destroy` command
#[derive(Args)]
pub struct DestroyArgs {
    /// Store path; a single secret unless --recursive
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Log what would be destroyed without mutating
    #[arg(long)]
    pub dry_run: bool,

    /// Allow destroying every secret under a folder path
    #[arg(long)]
    pub recursive: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Store path to back up, recursively
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output file (must not exist); defaults to a timestamped name
    #[arg(long)]
    pub output: Option<String>,
}

/// Arguments for the `migrate` command
#[derive(Args)]
pub struct MigrateArgs {
    /// JSON migration plan: {"schemes": [{"from", "to", "subschemes"?}]}
    #[arg(value_name = "JSONFILE")]
    pub jsonfile: String,

    /// Log the staged migration plan without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `migrate-and-destroy` command
#[derive(Args)]
pub struct MigrateAndDestroyArgs {
    /// JSON migration plan: {"schemes": [{"from", "to", "subschemes"?}]}
    #[arg(value_name = "JSONFILE")]
    pub jsonfile: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read secrets down the tree starting from a path
    Get(GetArgs),

    /// Create new versions overwriting with the provided secrets
    Set(SetArgs),

    /// Create new versions by appending to the existing secrets
    Add(AddArgs),

    /// Delete the latest version of secrets
    Delete(DeleteArgs),

    /// Permanently delete secrets, all versions and metadata
    Destroy(DestroyArgs),

    /// Produce a backup JSON file starting from the provided path
    Backup(BackupArgs),

    /// Migrate secrets according to a migration plan
    Migrate(MigrateArgs),

    /// Migrate and destroy the source paths. Handle with care
    MigrateAndDestroy(MigrateAndDestroyArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
