use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::power::{Number, DEFAULT_STEP, DEFAULT_VALUE};

/// Address the web form binds to when neither `--bind` nor the config set one
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Hex color overrides for the terminal theme ("#RRGGBB" or "#RGB")
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Value the input field starts from
    pub default_value: Number,

    /// Increment applied by Up/Down in the terminal form and by the web input
    pub step: i64,

    /// Listen address for `--serve`
    pub bind: String,

    /// Start the terminal form from the value it was closed with
    pub remember_last: bool,

    /// Last valid value entered in the terminal form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_value: Option<Number>,

    pub theme: ThemeOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_value: DEFAULT_VALUE,
            step: DEFAULT_STEP,
            bind: DEFAULT_BIND.to_string(),
            remember_last: false,
            last_value: None,
            theme: ThemeOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("powcalc");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_init(&path),
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Config at `path`; defaults when it is missing or broken.
    /// A missing file is created with the defaults, a broken one is left alone.
    fn load_or_init(path: &Path) -> Self {
        if let Some(config) = Self::load_from(path) {
            return config;
        }

        let config = AppConfig::default();
        if !path.exists() {
            if let Err(e) = config.save_to(path) {
                tracing::warn!("Could not write default config to {}: {}", path.display(), e);
            }
        }
        config
    }

    /// Read and parse `path`; `None` if it is missing or unreadable
    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => Some(config.sanitized()),
                Err(e) => {
                    tracing::warn!("Failed to parse config: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config: {}", e);
                None
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&self.clone().sanitized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace settings the form cannot use with their defaults
    fn sanitized(mut self) -> Self {
        if self.step <= 0 {
            tracing::warn!("Ignoring non-positive step {}, using {}", self.step, DEFAULT_STEP);
            self.step = DEFAULT_STEP;
        }
        if self.bind.trim().is_empty() {
            self.bind = DEFAULT_BIND.to_string();
        }
        self
    }

    /// Value the terminal form opens with
    pub fn start_value(&self) -> Number {
        match self.last_value {
            Some(last) if self.remember_last => last,
            _ => self.default_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            default_value: Number::Integer(4),
            step: 2,
            bind: "0.0.0.0:9000".to_string(),
            remember_last: true,
            last_value: Some(Number::Float(2.5)),
            theme: ThemeOverrides {
                accent: Some("#FFC107".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("step = 5\n").unwrap();
        assert_eq!(config.step, 5);
        assert_eq!(config.default_value, Number::Integer(1));
        assert_eq!(config.bind, DEFAULT_BIND);
        assert!(!config.remember_last);
    }

    #[test]
    fn test_sanitized_step() {
        let config: AppConfig = toml::from_str("step = 0\nbind = \"\"\n").unwrap();
        let config = config.sanitized();
        assert_eq!(config.step, DEFAULT_STEP);
        assert_eq!(config.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_start_value() {
        let mut config = AppConfig {
            last_value: Some(Number::Integer(9)),
            ..Default::default()
        };
        assert_eq!(config.start_value(), Number::Integer(1));

        config.remember_last = true;
        assert_eq!(config.start_value(), Number::Integer(9));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig {
            default_value: Number::Integer(3),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), Some(config));

        std::fs::write(&path, "step = \"fast\"").unwrap();
        assert_eq!(AppConfig::load_from(&path), None);
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(AppConfig::load_or_init(&path), AppConfig::default());
        assert!(path.exists());
        assert_eq!(AppConfig::load_from(&path), Some(AppConfig::default()));
    }

    #[test]
    fn test_broken_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "step = [").unwrap();

        assert_eq!(AppConfig::load_or_init(&path), AppConfig::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "step = [");
    }

    #[test]
    fn test_unwritable_path_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("config.toml");

        assert_eq!(AppConfig::load_or_init(&path), AppConfig::default());
        assert!(!path.exists());
    }
}
