use vaultier_core::Planner;

use crate::app::AppContext;
use crate::cli::DestroyArgs;

use super::mode;

/// Permanently destroy all versions and metadata. No way back.
pub fn handle_destroy(ctx: &AppContext, args: &DestroyArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let planner = Planner::new(store);
    planner.destroy(&args.path, args.recursive, mode(args.dry_run))?;
    Ok(())
}
