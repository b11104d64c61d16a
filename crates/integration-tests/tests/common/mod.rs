//! Shared helpers: stub estimator executables
#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use estimate_core::{EstimatorSettings, PostProcessor};
use estimate_infra_system::SubprocessRunner;
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};

/// Serializes stub creation and spawning within one test binary.
/// Exec'ing a script while another thread forks with its write fd still
/// open fails with ETXTBSY.
static SPAWN_LOCK: Mutex<()> = Mutex::const_new(());

pub async fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().await
}

/// A `/bin/sh` script standing in for the estimator
pub struct StubEstimator {
    dir: TempDir,
    path: PathBuf,
}

impl StubEstimator {
    /// `body` runs with `$1..$4` = flag, config arg, `post-process`, work file
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("klipper_estimator");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();

        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scratch directory next to the script, outlives the work dir
    pub fn scratch(&self) -> &Path {
        self.dir.path()
    }

    pub fn settings(&self, config_kind: &str, config_arg: &str) -> EstimatorSettings {
        EstimatorSettings::new(self.path.to_string_lossy(), config_kind, config_arg)
    }

    pub fn processor(&self) -> PostProcessor {
        self.processor_with("file", "/etc/cfg")
    }

    pub fn processor_with(&self, config_kind: &str, config_arg: &str) -> PostProcessor {
        processor_for(self.settings(config_kind, config_arg))
    }
}

pub fn processor_for(settings: EstimatorSettings) -> PostProcessor {
    PostProcessor::new(Arc::new(SubprocessRunner::new()), settings)
}

pub fn lines(raw: &[&str]) -> estimate_core::LineStream {
    raw.iter().copied().collect()
}
