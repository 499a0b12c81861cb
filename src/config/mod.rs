use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Preference store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// false → keep preferences in memory for this run only
    #[serde(default = "default_true")]
    pub persist: bool,
}

/// CSV export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

/// Startup theme hint, used only when no preference is stored
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub prefers_dark: bool,
}

/// Rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_recent_filings")]
    pub recent_filings: usize,

    #[serde(default = "default_true")]
    pub color: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_db_path() -> PathBuf {
    PathBuf::from("data/sec-tracker.duckdb")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_recent_filings() -> usize {
    4
}
fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            persist: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_filings: default_recent_filings(),
            color: true,
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::load_with(Self::environment())
    }

    /// `SEC_TRACKER__SECTION__KEY=value` overrides, e.g.
    /// `SEC_TRACKER__THEME__PREFERS_DARK=true`.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("SEC_TRACKER")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(env)
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|e| {
            warn!("Invalid configuration ({}), using defaults", e);
            AppConfig::default()
        });
        Ok(app_cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.storage.db_path, PathBuf::from("data/sec-tracker.duckdb"));
        assert!(cfg.storage.persist);
        assert!(!cfg.theme.prefers_dark);
        assert_eq!(cfg.display.recent_filings, 4);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[theme]\nprefers_dark = true\n[export]\ndir = \"out\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(cfg.theme.prefers_dark);
        assert_eq!(cfg.export.dir, PathBuf::from("out"));
        assert_eq!(cfg.display.recent_filings, 4);
        assert!(cfg.storage.persist);
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_env_overrides() {
        let cfg = AppConfig::load_with(env(&[
            ("SEC_TRACKER__THEME__PREFERS_DARK", "true"),
            ("SEC_TRACKER__DISPLAY__RECENT_FILINGS", "2"),
            ("SEC_TRACKER__STORAGE__PERSIST", "false"),
            ("SEC_TRACKER__EXPORT__DIR", "exports"),
            ("OTHER_APP__THEME__PREFERS_DARK", "false"),
        ]))
        .unwrap();

        assert!(cfg.theme.prefers_dark);
        assert_eq!(cfg.display.recent_filings, 2);
        assert!(!cfg.storage.persist);
        assert_eq!(cfg.export.dir, PathBuf::from("exports"));
        assert!(cfg.display.color);
    }

    #[test]
    fn test_invalid_env_value_falls_back_to_defaults() {
        let cfg = AppConfig::load_with(env(&[("SEC_TRACKER__DISPLAY__RECENT_FILINGS", "many")]))
            .unwrap();
        assert_eq!(cfg.display.recent_filings, 4);
    }
}
