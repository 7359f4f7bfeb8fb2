//! Command handlers for the Vaultier CLI.

mod backup;
mod delete;
mod destroy;
mod get;
mod migrate;
mod misc;
mod secrets;

pub use backup::handle_backup;
pub use delete::handle_delete;
pub use destroy::handle_destroy;
pub use get::handle_get;
pub use migrate::{handle_migrate, handle_migrate_and_destroy};
pub use misc::handle_completions;
pub use secrets::{handle_add, handle_set};

use std::fs;

use vaultier_core::{Mode, SecretsByPath};

/// Map the `--dry-run` flag to an explicit execution mode.
pub(crate) fn mode(dry_run: bool) -> Mode {
    if dry_run {
        Mode::DryRun
    } else {
        Mode::Apply
    }
}

/// Read a `path -> {name: value}` JSON file, as consumed by set/add.
pub(crate) fn read_secrets_file(jsonfile: &str) -> anyhow::Result<SecretsByPath> {
    let raw = fs::read_to_string(jsonfile)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", jsonfile, e))?;
    let data: SecretsByPath = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid secrets file {}: {}", jsonfile, e))?;
    Ok(data)
}

/// Read a migration plan JSON file.
pub(crate) fn read_plan_file(jsonfile: &str) -> anyhow::Result<vaultier_core::MigrationPlan> {
    let raw = fs::read_to_string(jsonfile)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", jsonfile, e))?;
    let plan = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid migration plan {}: {}", jsonfile, e))?;
    Ok(plan)
}
