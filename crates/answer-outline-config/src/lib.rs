use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "Invalid render indentation: expected shallow < deep < subpoint, got {shallow} / {deep} / {subpoint}"
    )]
    InvalidIndent {
        shallow: usize,
        deep: usize,
        subpoint: usize,
    },
}

/// Column widths used when an answer outline is laid out as plain text.
///
/// Numbered points sit at `shallow_indent` when the answer has no preamble and
/// at `deep_indent` when they are nested under one. Lettered sub-points always
/// sit at `subpoint_indent`, which must be deeper than both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub shallow_indent: usize,
    pub deep_indent: usize,
    pub subpoint_indent: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shallow_indent: 2,
            deep_indent: 4,
            subpoint_indent: 6,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub answers_path: PathBuf,
    #[serde(default)]
    pub render: RenderSettings,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded answers path
        config.answers_path =
            Self::expand_path(&config.answers_path).unwrap_or(config.answers_path);
        config.validate()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/answer-outline");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Rejects indentation settings that would flatten the outline hierarchy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let RenderSettings {
            shallow_indent,
            deep_indent,
            subpoint_indent,
        } = self.render;
        if shallow_indent < deep_indent && deep_indent < subpoint_indent {
            Ok(())
        } else {
            Err(ConfigError::InvalidIndent {
                shallow: shallow_indent,
                deep: deep_indent,
                subpoint: subpoint_indent,
            })
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
