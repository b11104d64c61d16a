// Estimator Settings - the three host-supplied options

use serde::{Deserialize, Serialize};

/// Prefix joined with the configured kind, e.g. `--config_file`
pub const CONFIG_FLAG_PREFIX: &str = "--config_";

/// Settings passed through to the external estimator
///
/// Values are never validated here. An empty or bogus `path` surfaces as a
/// launch failure, a bad kind/argument as a non-zero exit of the estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Path to the estimator binary
    pub path: String,
    /// Config source kind, e.g. `file` or `moonraker_url`
    pub config_kind: String,
    /// Config source argument: a file path or a Moonraker URL
    pub config_arg: String,
}

impl EstimatorSettings {
    pub fn new(
        path: impl Into<String>,
        config_kind: impl Into<String>,
        config_arg: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            config_kind: config_kind.into(),
            config_arg: config_arg.into(),
        }
    }

    /// `--config_<kind>` flag selecting how the estimator reads `config_arg`
    pub fn config_flag(&self) -> String {
        format!("{}{}", CONFIG_FLAG_PREFIX, self.config_kind)
    }

    /// Known kind, if the configured one is recognised
    pub fn known_kind(&self) -> Option<ConfigKind> {
        ConfigKind::parse(&self.config_kind)
    }
}

/// Config source kinds understood by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    File,
    MoonrakerUrl,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 2] = [ConfigKind::File, ConfigKind::MoonrakerUrl];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKind::File => "file",
            ConfigKind::MoonrakerUrl => "moonraker_url",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
