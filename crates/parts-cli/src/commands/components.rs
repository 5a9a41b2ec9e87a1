use parts_core::entities::Component;
use parts_core::enums::ComponentOrder;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ComponentsArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ComponentListResponse {
    order: ComponentOrder,
    components: Vec<Component>,
}

/// Handle `parts components`.
pub async fn handle(
    args: &ComponentsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or(ctx.config.general.default_limit);
    let order = ComponentOrder::from(args.order);
    let components = ctx.service.list_components(order, limit).await?;

    output(&ComponentListResponse { order, components }, flags.format)
}
