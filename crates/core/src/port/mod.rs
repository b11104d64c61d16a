// Port Layer - Interfaces for external dependencies

pub mod process_runner;

// Re-exports
pub use process_runner::{ExecutionError, ProcessOutput, ProcessRunner};
