// Domain Layer - Pure data exchanged between host, adapter and estimator

pub mod descriptor;
pub mod invocation;
pub mod line_stream;
pub mod settings;

// Re-exports
pub use descriptor::{PluginDescriptor, SettingDefinition, DESCRIPTOR_SCHEMA_VERSION};
pub use invocation::{Invocation, POST_PROCESS_SUBCOMMAND};
pub use line_stream::LineStream;
pub use settings::{ConfigKind, EstimatorSettings, CONFIG_FLAG_PREFIX};
