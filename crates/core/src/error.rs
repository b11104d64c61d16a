// Central Error Type for the post-process pipeline

use thiserror::Error;

use crate::port::ExecutionError;

/// Coarse failure class, for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Estimator could not be started
    Launch,
    /// Estimator ran and exited non-zero
    Process,
    /// Work file or directory I/O failed
    Filesystem,
    /// Settings could not be loaded
    Config,
}

/// Post-process error type
#[derive(Error, Debug)]
pub enum PostProcessError {
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run klipper_estimator\n{output}")]
    ProcessFailed {
        exit_code: Option<i32>,
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PostProcessError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PostProcessError::Launch { .. } => FailureKind::Launch,
            PostProcessError::ProcessFailed { .. } => FailureKind::Process,
            PostProcessError::Io(_) => FailureKind::Filesystem,
            PostProcessError::Config(_) => FailureKind::Config,
        }
    }

    /// Captured estimator output, for process failures
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            PostProcessError::ProcessFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

impl From<ExecutionError> for PostProcessError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::SpawnFailed { program, source } => {
                PostProcessError::Launch { program, source }
            }
            ExecutionError::Io(e) => PostProcessError::Io(e),
        }
    }
}

/// Result type alias using PostProcessError
pub type Result<T> = std::result::Result<T, PostProcessError>;
