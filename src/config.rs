//! Configuration loading and validation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    paths::{self, DEFAULT_CATALOG_PATH, DEFAULT_CONFIG_FILE, DEFAULT_PRESET_PATH},
    suggest::DEFAULT_THRESHOLD,
};

/// Resolved settings for a lint run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Preset document to validate.
    pub(crate) preset: PathBuf,
    /// Message catalog to check `messageKey` values against.
    pub(crate) catalog: PathBuf,
    /// Minimum similarity for fuzzy suggestions.
    pub(crate) threshold: f32,
}

/// Raw config file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// Preset document path.
    preset: Option<String>,
    /// Message catalog path.
    catalog: Option<String>,
    /// Suggestion threshold.
    threshold: Option<f32>,
}

/// Values given on the command line, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file; must exist when given.
    pub(crate) config: Option<PathBuf>,
    /// Preset document path.
    pub(crate) preset: Option<PathBuf>,
    /// Message catalog path.
    pub(crate) catalog: Option<PathBuf>,
    /// Suggestion threshold.
    pub(crate) threshold: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: PathBuf::from(DEFAULT_PRESET_PATH),
            catalog: PathBuf::from(DEFAULT_CATALOG_PATH),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Config {
    /// Resolve settings from defaults, the config file in `work_dir`, and overrides.
    pub(crate) fn resolve(work_dir: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = match &overrides.config {
            Some(path) => Self::load_from(path)?,
            None => {
                let implicit = work_dir.join(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::load_from(&implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(preset) = overrides.preset {
            config.preset = preset;
        }
        if let Some(catalog) = overrides.catalog {
            config.catalog = catalog;
        }
        if let Some(threshold) = overrides.threshold {
            config.threshold = threshold;
        }

        if !(config.threshold > 0.0 && config.threshold <= 1.0) {
            return Err(Error::InvalidThreshold {
                value: config.threshold,
            });
        }

        debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Load a config file from an explicit path, layered over the defaults.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| Error::ConfigRead {
            path: path.to_path_buf(),
            source: error,
        })?;

        let raw: RawConfig = toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::default();
        if let Some(preset) = raw.preset {
            config.preset = paths::expand_path(&preset, base_dir)?;
        }
        if let Some(catalog) = raw.catalog {
            config.catalog = paths::expand_path(&catalog, base_dir)?;
        }
        if let Some(threshold) = raw.threshold {
            config.threshold = threshold;
        }

        Ok(config)
    }

    /// Preset document to validate.
    pub(crate) fn preset(&self) -> &Path {
        &self.preset
    }

    /// Message catalog path.
    pub(crate) fn catalog(&self) -> &Path {
        &self.catalog
    }

    /// Suggestion threshold.
    pub(crate) fn threshold(&self) -> f32 {
        self.threshold
    }
}
