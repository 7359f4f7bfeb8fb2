use std::path::Path;

use chrono::Local;
use vaultier_core::Planner;

use crate::app::AppContext;
use crate::cli::BackupArgs;

/// Back up everything under a path to a new JSON file.
pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let output = args.output.clone().unwrap_or_else(default_backup_name);
    let store = ctx.store()?;
    let planner = Planner::new(store);
    planner.backup(&args.path, Path::new(&output))?;
    println!("Backed up {} to {}", args.path, output);
    Ok(())
}

fn default_backup_name() -> String {
    format!(
        "backup_vault_{}.json",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backup_name_shape() {
        let name = default_backup_name();
        assert!(name.starts_with("backup_vault_"));
        assert!(name.ends_with(".json"));
    }
}
