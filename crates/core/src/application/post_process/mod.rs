// Post-Process Service - the host-facing entry point

pub mod work_dir;

pub use work_dir::WorkDir;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{EstimatorSettings, Invocation, LineStream};
use crate::error::{PostProcessError, Result};
use crate::port::ProcessRunner;

/// Post-process adapter
///
/// Writes the host's lines to a scoped work file, runs the estimator on it
/// once, and hands back whatever the estimator left in the file.
pub struct PostProcessor {
    runner: Arc<dyn ProcessRunner>,
    settings: EstimatorSettings,
    temp_root: Option<PathBuf>,
}

impl PostProcessor {
    pub fn new(runner: Arc<dyn ProcessRunner>, settings: EstimatorSettings) -> Self {
        if settings.known_kind().is_none() {
            warn!(
                config_kind = %settings.config_kind,
                "Unrecognised config kind, passing it through to the estimator"
            );
        }

        Self {
            runner,
            settings,
            temp_root: None,
        }
    }

    /// Create work directories under `root` instead of the system temp dir
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    /// Run the estimator over `lines` and return the rewritten stream
    ///
    /// # Errors
    /// - PostProcessError::Launch if the estimator cannot be started
    /// - PostProcessError::ProcessFailed if it exits non-zero
    /// - PostProcessError::Io on work file I/O failure
    pub async fn execute(&self, lines: LineStream) -> Result<LineStream> {
        let work_dir = WorkDir::create(self.temp_root.as_deref())?;
        work_dir.write_lines(&lines).await?;

        let invocation = Invocation::post_process(&self.settings, work_dir.work_file());

        debug!(
            work_dir = %work_dir.path().display(),
            lines_in = lines.len(),
            argv = ?invocation.argv(),
            "Invoking estimator"
        );

        let output = self.runner.run(&invocation).await?;

        if !output.success() {
            warn!(
                exit_code = ?output.exit_code,
                duration_ms = output.duration_ms,
                "Estimator exited with failure"
            );
            return Err(PostProcessError::ProcessFailed {
                exit_code: output.exit_code,
                output: output.output_lossy(),
            });
        }

        let rewritten = work_dir.read_lines().await?;
        work_dir.close()?;

        info!(
            lines_in = lines.len(),
            lines_out = rewritten.len(),
            duration_ms = output.duration_ms,
            "Post-processing completed"
        );

        Ok(rewritten)
    }
}
