//! Migrate secrets according to a JSON migration plan.

use vaultier_core::{Mode, Planner};

use crate::app::AppContext;
use crate::cli::{MigrateAndDestroyArgs, MigrateArgs};

use super::{mode, read_plan_file};

pub fn handle_migrate(ctx: &AppContext, args: &MigrateArgs) -> anyhow::Result<()> {
    let plan = read_plan_file(&args.jsonfile)?;
    let store = ctx.store()?;
    let planner = Planner::new(store);
    for scheme in &plan.schemes {
        planner.migrate(
            &scheme.from_path,
            &scheme.to_path,
            scheme.subschemes.as_deref(),
            mode(args.dry_run),
        )?;
    }
    Ok(())
}

/// Migrate everything, then destroy every source path. Two independent
/// phases with no rollback; handle with care.
pub fn handle_migrate_and_destroy(
    ctx: &AppContext,
    args: &MigrateAndDestroyArgs,
) -> anyhow::Result<()> {
    let plan = read_plan_file(&args.jsonfile)?;
    let store = ctx.store()?;
    let planner = Planner::new(store);
    planner.migrate_and_destroy(&plan, Mode::Apply)?;
    Ok(())
}
