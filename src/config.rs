use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::block::HeadingLevel;
use crate::error::ComposeError;
use crate::variant::Variant;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub outline: OutlineConfig,
    pub variants: VariantsConfig,
    pub code: CodeConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutlineConfig {
    /// Heading level listed in the outline
    pub level: u8,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self { level: 2 }
    }
}

impl OutlineConfig {
    pub fn nav_level(&self) -> HeadingLevel {
        HeadingLevel::from_u8(self.level).unwrap_or_else(|| {
            log::warn!("outline.level = {} is not 1 or 2, using 2", self.level);
            HeadingLevel::H2
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VariantsConfig {
    /// Variant rendered when the caller does not choose one
    pub default: Option<String>,
}

impl VariantsConfig {
    pub fn default_variant(&self) -> Result<Option<Variant>, ComposeError> {
        self.default.as_deref().map(str::parse::<Variant>).transpose()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    pub dedent: bool,
    /// Languages rendered in diff mode
    pub diff_languages: Vec<String>,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            dedent: true,
            diff_languages: vec!["diff".to_string()],
        }
    }
}

impl CodeConfig {
    pub fn is_diff(&self, language: &str) -> bool {
        self.diff_languages.iter().any(|d| d == language)
    }
}

impl Config {
    /// The configuration bundled with the crate. `build.rs` checks it parses.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. A missing file is `Ok(None)`.
    pub fn load(config_path: &Path) -> Result<Option<Self>, ConfigError> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }
}
