// Process Runner Port
// Abstraction for running the external estimator to completion

use crate::domain::Invocation;
use async_trait::async_trait;
use thiserror::Error;

/// Result of a finished process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Combined stdout + stderr
    pub output: Vec<u8>,
    pub duration_ms: u64,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed for '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Process Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns the real estimator binary
/// - MockProcessRunner: scripted behaviour for tests
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation and wait for it to exit
    ///
    /// A non-zero exit is NOT an error here; callers inspect `ProcessOutput`.
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the program cannot be started
    /// - ExecutionError::Io if waiting or collecting output fails
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit 0 without touching the work file
        Success,
        /// Overwrite the work file with these contents, then exit 0
        Rewrite(String),
        /// Exit with a code and combined output
        Fail { exit_code: Option<i32>, output: String },
        /// Fail to spawn with this io error kind
        SpawnError(std::io::ErrorKind),
    }

    /// What the mock saw when it was called
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub invocation: Invocation,
        /// Work file contents at call time, if readable
        pub work_file_contents: Option<String>,
    }

    /// Mock Process Runner for testing
    pub struct MockProcessRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<RecordedCall>>>,
    }

    impl MockProcessRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }
        pub fn new_rewrite(contents: impl Into<String>) -> Self {
            Self::new(MockBehavior::Rewrite(contents.into()))
        }
        pub fn new_fail(exit_code: i32, output: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail {
                exit_code: Some(exit_code),
                output: output.into(),
            })
        }
        pub fn new_spawn_error(kind: std::io::ErrorKind) -> Self {
            Self::new(MockBehavior::SpawnError(kind))
        }
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
            let work_file_contents = match invocation.work_file() {
                Some(path) => tokio::fs::read_to_string(path).await.ok(),
                None => None,
            };
            self.calls.lock().unwrap().push(RecordedCall {
                invocation: invocation.clone(),
                work_file_contents,
            });

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Success => Ok(ProcessOutput {
                    exit_code: Some(0),
                    output: Vec::new(),
                    duration_ms: 1,
                }),
                MockBehavior::Rewrite(contents) => {
                    if let Some(path) = invocation.work_file() {
                        tokio::fs::write(path, contents).await?;
                    }
                    Ok(ProcessOutput {
                        exit_code: Some(0),
                        output: Vec::new(),
                        duration_ms: 1,
                    })
                }
                MockBehavior::Fail { exit_code, output } => Ok(ProcessOutput {
                    exit_code,
                    output: output.into_bytes(),
                    duration_ms: 1,
                }),
                MockBehavior::SpawnError(kind) => Err(ExecutionError::SpawnFailed {
                    program: invocation.program.clone(),
                    source: std::io::Error::from(kind),
                }),
            }
        }
    }
}
