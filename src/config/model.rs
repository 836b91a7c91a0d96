//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the startup catalog comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON seed file; the built-in catalog is used when unset.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

/// UI appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// How the row-level delete key picks its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteDispatch {
    /// Delete exactly the row under the cursor.
    #[default]
    Explicit,
    /// Redirect to the book being edited, then to the selection, before
    /// falling back to the row.
    Legacy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub delete_dispatch: DeleteDispatch,
    #[serde(default)]
    pub bell_on_noop: bool,
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_title() -> String {
    "A Modern Library Experience".to_string()
}
fn default_tick_rate() -> u64 {
    250
}
fn default_log_dir() -> String {
    "~/.local/share/crabshelf/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.catalog.seed_file.is_none());
        assert_eq!(cfg.ui.title, "A Modern Library Experience");
        assert_eq!(cfg.ui.tick_rate_ms, 250);
        assert_eq!(cfg.behavior.delete_dispatch, DeleteDispatch::Explicit);
        assert!(!cfg.logging.enabled);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [catalog]
            seed_file = "/tmp/books.json"

            [behavior]
            delete_dispatch = "legacy"

            [logging]
            enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.catalog.seed_file, Some(PathBuf::from("/tmp/books.json")));
        assert_eq!(cfg.behavior.delete_dispatch, DeleteDispatch::Legacy);
        assert!(!cfg.behavior.bell_on_noop);
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.logging.log_dir, "~/.local/share/crabshelf/logs");
    }

    #[test]
    fn test_unknown_dispatch_rejected() {
        let res: Result<AppConfig, _> = toml::from_str("[behavior]\ndelete_dispatch = \"guess\"\n");
        assert!(res.is_err());
    }
}
