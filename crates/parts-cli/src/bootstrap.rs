use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env` support) and apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<parts_config::PartsConfig> {
    let mut config = parts_config::PartsConfig::load_with_dotenv()?;

    if let Some(path) = &flags.db {
        tracing::debug!(path, "database path overridden on the command line");
        config.database.path.clone_from(path);
        config.database.validate()?;
    }

    Ok(config)
}
