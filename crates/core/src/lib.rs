// Estimate Core - Domain Logic & Ports
// NO process spawning here (hexagonal layout)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::PostProcessor;
pub use domain::{EstimatorSettings, LineStream};
pub use error::{FailureKind, PostProcessError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
