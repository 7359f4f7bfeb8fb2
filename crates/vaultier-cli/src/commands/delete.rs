use vaultier_core::Planner;

use crate::app::AppContext;
use crate::cli::DeleteArgs;

use super::mode;

/// Delete the latest version at a leaf, or under a whole folder with
/// `--recursive`.
pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let planner = Planner::new(store);
    planner.delete(&args.path, args.recursive, mode(args.dry_run))?;
    Ok(())
}
