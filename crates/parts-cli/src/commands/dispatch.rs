use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Migrate => commands::migrate::handle(ctx, flags),
        Commands::SeedUsers(args) => commands::seed_users::handle(&args, ctx, flags).await,
        Commands::Components(args) => commands::components::handle(&args, ctx, flags).await,
    }
}
