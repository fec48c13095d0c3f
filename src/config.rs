//! Grid configuration loaded from `grid.json` in the user's config directory.

use crate::constants::{DEFAULT_GAP, DEFAULT_MIN_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for `{field}`: {value}")]
    Invalid { field: &'static str, value: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub row_height: f32,
    pub gap: f32,
    /// Lower bound of each column track; the template fits as many columns as the
    /// container allows and stretches them evenly.
    pub min_column_width: f32,
    pub show_handles: bool,
    pub enable_drag: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            gap: DEFAULT_GAP,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            show_handles: true,
            enable_drag: true,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "row_height",
                value: self.row_height,
            });
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gap",
                value: self.gap,
            });
        }
        if !self.min_column_width.is_finite() || self.min_column_width <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "min_column_width",
                value: self.min_column_width,
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: GridConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Loads the config, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No grid config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded grid config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default grid config");
                Self::default()
            }
        }
    }
}
