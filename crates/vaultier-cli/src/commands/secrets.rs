//! Set and add: create new secret versions from a JSON file.

use vaultier_core::Planner;

use crate::app::AppContext;
use crate::cli::{AddArgs, SetArgs};

use super::{mode, read_secrets_file};

/// Overwrite: the new version holds exactly the provided secrets.
pub fn handle_set(ctx: &AppContext, args: &SetArgs) -> anyhow::Result<()> {
    let data = read_secrets_file(&args.jsonfile)?;
    let store = ctx.store()?;
    let planner = Planner::new(store);
    for (path, secret) in &data {
        planner.set(path, secret, mode(args.dry_run))?;
    }
    Ok(())
}

/// Append: provided secrets are merged over the existing version.
pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let data = read_secrets_file(&args.jsonfile)?;
    let store = ctx.store()?;
    let planner = Planner::new(store);
    for (path, secret) in &data {
        planner.add(path, secret, mode(args.dry_run))?;
    }
    Ok(())
}
