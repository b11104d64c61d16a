//! Settings loading
//!
//! Layers, lowest to highest precedence:
//! 1. empty defaults
//! 2. optional settings file (format from extension: `.toml`, `.json`, ...)
//! 3. `ESTIMATE_BRIDGE_*` environment variables
//! 4. command-line flags

use std::path::Path;

use config::{Config, Environment, File, Map};
use estimate_core::{EstimatorSettings, PostProcessError, Result};

pub const ENV_PREFIX: &str = "ESTIMATE_BRIDGE";

/// Values given directly on the command line
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub path: Option<String>,
    pub config_kind: Option<String>,
    pub config_arg: Option<String>,
}

impl SettingsOverrides {
    fn apply(self, settings: &mut EstimatorSettings) {
        if let Some(path) = self.path {
            settings.path = path;
        }
        if let Some(kind) = self.config_kind {
            settings.config_kind = kind;
        }
        if let Some(arg) = self.config_arg {
            settings.config_arg = arg;
        }
    }
}

/// Load settings from file, process environment and overrides
pub fn load_settings(
    file: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<EstimatorSettings> {
    load_settings_with_env(file, None, overrides)
}

/// Same as [`load_settings`] with an explicit environment map instead of the
/// process environment
pub fn load_settings_with_env(
    file: Option<&Path>,
    env: Option<Map<String, String>>,
    overrides: SettingsOverrides,
) -> Result<EstimatorSettings> {
    let mut builder = Config::builder();

    if let Some(file) = file {
        builder = builder.add_source(File::from(file).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(env));

    let mut settings: EstimatorSettings = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| PostProcessError::Config(e.to_string()))?;

    overrides.apply(&mut settings);

    tracing::debug!(
        path = %settings.path,
        config_kind = %settings.config_kind,
        config_arg = %settings.config_arg,
        "Settings loaded"
    );

    Ok(settings)
}
