use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MigrateResponse<'a> {
    database: &'a str,
    migrated: bool,
}

/// Handle `parts migrate`.
///
/// Opening the service already applied the schema; this only reports where.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let database = ctx.config.database.path.as_str();
    if ctx.config.database.is_in_memory() {
        tracing::warn!("migrated an in-memory database; nothing is kept after exit");
    }
    output(
        &MigrateResponse {
            database,
            migrated: true,
        },
        flags.format,
    )
}
