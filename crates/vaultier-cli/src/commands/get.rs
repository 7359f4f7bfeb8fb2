use vaultier_core::{hide_secrets, Planner};

use crate::app::AppContext;
use crate::cli::GetArgs;

/// Read secrets recursively and print a masked summary.
///
/// Values stay masked on stdout; plaintext only ever leaves through
/// `backup`.
pub fn handle_get(ctx: &AppContext, args: &GetArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let planner = Planner::new(store);
    let secrets = planner.get(&args.path)?;
    println!("{}", serde_json::to_string_pretty(&hide_secrets(&secrets))?);
    Ok(())
}
