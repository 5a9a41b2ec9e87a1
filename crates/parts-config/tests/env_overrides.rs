use figment::Jail;
use parts_config::{ConfigError, PartsConfig};

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("PARTS_DATABASE__PATH", "/tmp/catalog.db");
        jail.set_env("PARTS_GENERAL__DEFAULT_LIMIT", "25");

        let config = PartsConfig::load().expect("config loads");
        assert_eq!(config.database.path, "/tmp/catalog.db");
        assert_eq!(config.general.default_limit, 25);
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("PARTS_DATABASE__BUSY_TIMEOUT_MS", "0");

        let err = PartsConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
