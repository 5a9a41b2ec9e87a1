use clap::{Args, Subcommand, ValueEnum};
use parts_core::enums::ComponentOrder;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create or upgrade the database schema.
    Migrate,
    /// Top up the user table with generated users.
    SeedUsers(SeedUsersArgs),
    /// List components as JSON. `--limit` caps the count.
    Components(ComponentsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SeedUsersArgs {
    /// Total number of users wanted (defaults to general.seed_user_count)
    #[arg(short, long)]
    pub count: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ComponentsArgs {
    /// Sort order
    #[arg(long, value_enum, default_value_t = OrderArg::CreatedDesc)]
    pub order: OrderArg,
}

/// Sort orders accepted on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OrderArg {
    CreatedDesc,
    CreatedAsc,
    ModifiedDesc,
}

impl From<OrderArg> for ComponentOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::CreatedDesc => Self::CreatedDesc,
            OrderArg::CreatedAsc => Self::CreatedAsc,
            OrderArg::ModifiedDesc => Self::LastModifiedDesc,
        }
    }
}
