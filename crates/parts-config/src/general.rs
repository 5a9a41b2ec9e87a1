//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list commands.
const fn default_limit() -> u32 {
    100
}

/// Default target for `seed-users`.
const fn default_seed_user_count() -> u32 {
    2280
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Number of users `seed-users` tops the table up to when no count is given.
    #[serde(default = "default_seed_user_count")]
    pub seed_user_count: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            seed_user_count: default_seed_user_count(),
        }
    }
}
