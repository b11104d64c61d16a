// Plugin Descriptor - metadata block registered with the host

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Host settings schema version this descriptor targets
pub const DESCRIPTOR_SCHEMA_VERSION: u32 = 2;

/// Metadata the host uses to list the script and render its settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub key: String,
    pub metadata: Map<String, Value>,
    pub version: u32,
    /// Serialized as a JSON object; the host renders settings in declaration order
    #[serde(serialize_with = "serialize_in_order")]
    pub settings: Vec<(String, SettingDefinition)>,
}

fn serialize_in_order<S: Serializer>(
    settings: &[(String, SettingDefinition)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(settings.iter().map(|(key, def)| (key, def)))
}

/// One string-typed setting as the host expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingDefinition {
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub default_value: String,
}

impl SettingDefinition {
    fn string(label: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
            kind: "str".to_string(),
            default_value: String::new(),
        }
    }
}

impl PluginDescriptor {
    /// Descriptor for the estimator post-process script
    pub fn estimator() -> Self {
        let settings = [
            (
                "path",
                SettingDefinition::string(
                    "Path to klipper_estimator",
                    "The path to the klipper_estimator binary.",
                ),
            ),
            (
                "config_kind",
                SettingDefinition::string("Kind of config to use(file or moonraker_url)", ""),
            ),
            (
                "config_arg",
                SettingDefinition::string("Config argument", "Path for file, URL for Moonraker"),
            ),
        ]
        .into_iter()
        .map(|(key, def)| (key.to_string(), def))
        .collect();

        Self {
            name: "Klipper estimator".to_string(),
            key: "KlipperEstimator".to_string(),
            metadata: Map::new(),
            version: DESCRIPTOR_SCHEMA_VERSION,
            settings,
        }
    }

    /// Setting definitions in declaration order
    pub fn setting_definitions(&self) -> &[(String, SettingDefinition)] {
        &self.settings
    }

    /// JSON settings string handed to the host
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
