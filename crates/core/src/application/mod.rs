// Application Layer - Use Cases

pub mod constants;
pub mod post_process;

// Re-exports
pub use post_process::{PostProcessor, WorkDir};
