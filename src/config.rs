//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/combinatoria/combinatoria.toml`
//! 3. Local config: explicit path handed to [`Settings::load`]
//! 4. Environment variables: `COMBINATORIA_*` prefix, `__` between nesting levels

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::LimitError;
use crate::errors::{SettingsError, SettingsResult};

pub use crate::domain::{ArithmeticLimits, OperatorSettings, MAX_REPRESENTABLE_FACTORIAL};

/// Raw operator toggles for intermediate parsing (`None` → inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOperatorSettings {
    pub enable_root_log_operations: Option<bool>,
    pub enable_logarithm_operations: Option<bool>,
}

/// Raw limits for intermediate parsing (`None` → inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawArithmeticLimits {
    pub max_magnitude: Option<f64>,
    pub max_factorial_operand: Option<u32>,
    pub integer_tolerance: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub operators: RawOperatorSettings,
    pub limits: RawArithmeticLimits,
}

/// Unified configuration for combinatoria.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Which optional operator families are attempted
    pub operators: OperatorSettings,
    /// Thresholds for the checked arithmetic
    pub limits: ArithmeticLimits,
}

/// Get the XDG config directory for combinatoria.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "combinatoria").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("combinatoria.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        origin: path.display().to_string(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            operators: OperatorSettings {
                enable_root_log_operations: overlay
                    .operators
                    .enable_root_log_operations
                    .unwrap_or(self.operators.enable_root_log_operations),
                enable_logarithm_operations: overlay
                    .operators
                    .enable_logarithm_operations
                    .unwrap_or(self.operators.enable_logarithm_operations),
            },
            limits: ArithmeticLimits {
                max_magnitude: overlay
                    .limits
                    .max_magnitude
                    .unwrap_or(self.limits.max_magnitude),
                max_factorial_operand: overlay
                    .limits
                    .max_factorial_operand
                    .unwrap_or(self.limits.max_factorial_operand),
                integer_tolerance: overlay
                    .limits
                    .integer_tolerance
                    .unwrap_or(self.limits.integer_tolerance),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional path to a project-local TOML file; ignored if it does not exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/combinatoria/combinatoria.toml`
    /// 3. Local config
    /// 4. Environment variables: `COMBINATORIA_*`
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Parse settings from a TOML string on top of the compiled defaults.
    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| SettingsError::Parse {
            origin: "<string>".into(),
            message: e.to_string(),
        })?;
        let settings = Self::default().merge_with(&raw);
        settings.validate()?;
        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Apply COMBINATORIA_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COMBINATORIA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_bool("operators.enable_root_log_operations") {
            settings.operators.enable_root_log_operations = val;
        }
        if let Ok(val) = config.get_bool("operators.enable_logarithm_operations") {
            settings.operators.enable_logarithm_operations = val;
        }
        if let Ok(val) = config.get_float("limits.max_magnitude") {
            settings.limits.max_magnitude = val;
        }
        if let Ok(val) = config.get_int("limits.max_factorial_operand") {
            settings.limits.max_factorial_operand =
                u32::try_from(val).map_err(|_| {
                    LimitError::new("max_factorial_operand", format!("{val} is not a valid operand"))
                })?;
        }
        if let Ok(val) = config.get_float("limits.integer_tolerance") {
            settings.limits.integer_tolerance = val;
        }

        Ok(settings)
    }

    /// Reject limits the checked arithmetic cannot honour.
    pub fn validate(&self) -> SettingsResult<()> {
        self.limits.validate()?;
        Ok(())
    }
}
