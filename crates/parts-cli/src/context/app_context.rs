use anyhow::Context;
use parts_config::PartsConfig;
use parts_db::service::PartsService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: PartsService,
    pub config: PartsConfig,
}

impl AppContext {
    /// Open the configured database (running migrations) and wrap it in a service.
    pub async fn init(config: PartsConfig) -> anyhow::Result<Self> {
        let service = PartsService::from_config(&config.database)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        tracing::debug!(path = %config.database.path, "parts service ready");
        Ok(Self { service, config })
    }
}
