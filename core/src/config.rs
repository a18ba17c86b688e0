use crate::categorizer::{CategoryRule, Categorizer};
use crate::errors::{AssistantError, AssistantResult};
use crate::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application name used for the config directory
pub const APP_NAME: &str = "cartvoice";

/// Default timeout for a single list store call
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Configuration for the shopping assistant
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// How many recognized commands to keep in memory
    pub history_limit: Option<usize>,
    /// Where the JSON list store lives
    pub store_path: Option<PathBuf>,
    /// Per-call timeout for list store operations, in milliseconds
    pub store_timeout_ms: Option<u64>,
    /// Whether to wire in the rule-based recommender
    pub enable_suggestions: Option<bool>,
    pub log_level: Option<String>,
    /// Custom taxonomy, scanned in the order given. Builtin when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryRule>>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            store_path: None,
            store_timeout_ms: Some(DEFAULT_STORE_TIMEOUT_MS),
            enable_suggestions: Some(true),
            log_level: Some("warn".to_string()),
            categories: None,
        }
    }
}

impl AssistantConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> AssistantResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                AssistantError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                AssistantError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> AssistantResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            AssistantError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AssistantError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            AssistantError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            history_limit: other.history_limit.or(self.history_limit),
            store_path: other.store_path.clone().or_else(|| self.store_path.clone()),
            store_timeout_ms: other.store_timeout_ms.or(self.store_timeout_ms),
            enable_suggestions: other.enable_suggestions.or(self.enable_suggestions),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
            categories: other.categories.clone().or_else(|| self.categories.clone()),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms.unwrap_or(DEFAULT_STORE_TIMEOUT_MS))
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.enable_suggestions.unwrap_or(true)
    }

    /// Store path from config, or `list.json` in the default config directory
    pub fn store_path(&self) -> AssistantResult<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(get_default_config_dir(APP_NAME)?.join("list.json")),
        }
    }

    /// Categorizer for the configured taxonomy
    pub fn categorizer(&self) -> Categorizer {
        match &self.categories {
            Some(rules) if !rules.is_empty() => Categorizer::new(rules.clone()),
            _ => Categorizer::builtin(),
        }
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> AssistantResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        AssistantError::ConfigError("Could not determine home directory".to_string())
    })?;

    let config_dir = home_dir.join(".config").join(app_name);

    Ok(config_dir)
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> AssistantResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}
