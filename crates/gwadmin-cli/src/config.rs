// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use gwadmin_app::ResourceKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_ENV: &str = "GWADMIN_LOG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("GWADMIN_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set GWADMIN_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(gwadmin_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [storage], [ui], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Regenerate it with `gwadmin --print-example-config`",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            gwadmin_db::validate_db_path(db_path)?;
        }

        if let Some(tab) = &self.ui.start_tab
            && ResourceKind::parse(tab).is_none()
        {
            bail!(
                "ui.start_tab in {} must be one of reservations, tickets, logs; got {tab:?}",
                path.display()
            );
        }

        if let Some(level) = &self.logging.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "logging.level in {} is not a valid filter directive (for example \"info\" or \"gwadmin_db=debug\")",
                    path.display()
                )
            })?;
        }

        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            bail!(
                "logging.file in {} must not be empty; remove it to use the default log path",
                path.display()
            );
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => gwadmin_db::default_db_path(),
        }
    }

    pub fn start_tab(&self) -> ResourceKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(ResourceKind::parse)
            .unwrap_or(ResourceKind::Reservations)
    }

    /// Filter directive for the log subscriber; `GWADMIN_LOG` wins over the file.
    pub fn log_filter(&self) -> String {
        match env::var(LOG_ENV) {
            Ok(directive) if !directive.trim().is_empty() => directive,
            _ => self
                .logging
                .level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(gwadmin_db::data_dir()?.join("gwadmin.log")),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# gwadmin config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/gwadmin/gwadmin.db)\n# db_path = \"/absolute/path/to/gwadmin.db\"\n\n[ui]\nstart_tab = \"reservations\"   # reservations | tickets | logs\n\n[logging]\nlevel = \"{}\"\n# file = \"/absolute/path/to/gwadmin.log\"\n",
            path.display(),
            DEFAULT_LOG_LEVEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, LOG_ENV};
    use anyhow::Result;
    use gwadmin_app::ResourceKind;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_tab(), ResourceKind::Reservations);
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nstart_tab = \"logs\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[storage], [ui], and [logging]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nstart_tab = \"Tickets\"\n[logging]\nlevel = \"gwadmin_db=debug\"\nfile = \"/tmp/gwadmin-test.log\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_tab(), ResourceKind::Tickets);
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/gwadmin-test.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_start_tab_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_tab = \"dashboard\"\n")?;
        let error = Config::load(&path).expect_err("unknown tab should fail");
        assert!(error.to_string().contains("ui.start_tab"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[logging]\nlevel = \"gwadmin=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad directive should fail");
        assert!(error.to_string().contains("logging.level"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("GWADMIN_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("GWADMIN_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn db_path_prefers_storage_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[storage]\ndb_path = \"/explicit/from-config.db\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("GWADMIN_DB_PATH", "/from/env.db");
        }
        let config = Config::load(&path)?;
        let resolved = config.db_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("GWADMIN_DB_PATH");
        }
        assert_eq!(resolved, PathBuf::from("/explicit/from-config.db"));
        Ok(())
    }

    #[test]
    fn db_path_uses_env_override_when_storage_db_path_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("GWADMIN_DB_PATH", "/from/env-only.db");
        }
        let config = Config::load(&path)?;
        let resolved = config.db_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("GWADMIN_DB_PATH");
        }
        assert_eq!(resolved, PathBuf::from("/from/env-only.db"));
        Ok(())
    }

    #[test]
    fn db_path_rejects_uri_style_storage_value() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[storage]\ndb_path = \"https://evil.example/gwadmin.db\"\n")?;
        let error = Config::load(&path).expect_err("URI db_path should fail validation");
        assert!(error.to_string().contains("looks like a URI"));
        Ok(())
    }

    #[test]
    fn log_env_overrides_configured_level() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[logging]\nlevel = \"warn\"\n")?;
        let config = Config::load(&path)?;

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_ENV);
        }
        assert_eq!(config.log_filter(), "warn");

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(LOG_ENV, "debug");
        }
        let overridden = config.log_filter();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_ENV);
        }
        assert_eq!(overridden, "debug");
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[logging]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_tab(), ResourceKind::Reservations);
        Ok(())
    }
}
