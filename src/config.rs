//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/openapi-subset/openapi-subset.toml`
//! 3. Explicit config file: `--config <FILE>`
//! 4. Environment variables: `OPENAPI_SUBSET_*` prefix
//!
//! Command line flags are applied last by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, OutputFormat};
use crate::domain::{FieldClass, FieldFilter};

const APP_NAME: &str = "openapi-subset";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "OPENAPI_SUBSET";

/// Unified configuration for openapi-subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Strip `description` entries
    pub remove_descriptions: bool,
    /// Strip `x-` extension entries
    pub remove_extensions: bool,
    /// Output format; unset means "decide from flags and output path"
    pub format: Option<OutputFormat>,
}

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified in this layer, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub remove_descriptions: Option<bool>,
    pub remove_extensions: Option<bool>,
    pub format: Option<OutputFormat>,
}

/// Get the XDG config directory for openapi-subset.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{}.toml", APP_NAME)))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Field filter for the enabled strip passes.
    pub fn filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with_if(FieldClass::Description, self.remove_descriptions)
            .with_if(FieldClass::Extension, self.remove_extensions)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            remove_descriptions: overlay
                .remove_descriptions
                .unwrap_or(self.remove_descriptions),
            remove_extensions: overlay.remove_extensions.unwrap_or(self.remove_extensions),
            format: overlay.format.or(self.format),
        }
    }

    /// Defaults overlaid with a single TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults (all passes off, format unset)
    /// 2. Global config: `$XDG_CONFIG_HOME/openapi-subset/openapi-subset.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `OPENAPI_SUBSET_*`
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply OPENAPI_SUBSET_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("remove_descriptions") {
            settings.remove_descriptions = val;
        }
        if let Ok(val) = config.get_bool("remove_extensions") {
            settings.remove_extensions = val;
        }
        if let Ok(val) = config.get_string("format") {
            let format = val
                .parse::<OutputFormat>()
                .map_err(|message| ApplicationError::Config { message })?;
            settings.format = Some(format);
        }

        Ok(settings)
    }

    /// Apply command line flags. Flags can only switch a pass on.
    pub fn with_cli_flags(mut self, remove_descriptions: bool, remove_extensions: bool) -> Self {
        self.remove_descriptions |= remove_descriptions;
        self.remove_extensions |= remove_extensions;
        self
    }
}
