//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use parts_config::PartsConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "./inventory.db"
busy_timeout_ms = 250
"#,
        )?;

        let config: PartsConfig = Figment::from(Serialized::defaults(PartsConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "./inventory.db");
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.general.default_limit, 100);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".parts")).expect("mkdir");
        jail.create_file(
            ".parts/config.toml",
            r"
[general]
default_limit = 10
seed_user_count = 3
",
        )?;

        let config = PartsConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 10);
        assert_eq!(config.general.seed_user_count, 3);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"
"#,
        )?;
        jail.set_env("PARTS_DATABASE__PATH", "from-env.db");

        let config: PartsConfig = Figment::from(Serialized::defaults(PartsConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PARTS_").split("__"))
            .extract()?;

        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[general]
default_limit = 7
",
        )?;

        let config: PartsConfig = Figment::from(Serialized::defaults(PartsConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_limit, 7);
        assert_eq!(config.general.seed_user_count, 2280);
        assert_eq!(config.database.path, ".parts/parts.db");
        Ok(())
    });
}
