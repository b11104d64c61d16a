// Subprocess runner implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
#[cfg(unix)]
use std::os::fd::OwnedFd;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info};

use estimate_core::domain::Invocation;
use estimate_core::port::process_runner::{ExecutionError, ProcessOutput, ProcessRunner};

/// Subprocess runner
/// Spawns the estimator, waits for it to exit and captures combined output.
/// The child inherits environment and working directory; stdin is closed.
#[derive(Debug, Default, Clone)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    fn spawn_failed(invocation: &Invocation, source: std::io::Error) -> ExecutionError {
        ExecutionError::SpawnFailed {
            program: invocation.program.clone(),
            source,
        }
    }

    /// Spawn with stdout and stderr sharing one pipe, so output keeps its
    /// interleaving
    #[cfg(unix)]
    async fn spawn_and_wait(
        &self,
        invocation: &Invocation,
    ) -> Result<(ExitStatus, Vec<u8>), ExecutionError> {
        let (read_end, write_end) = cloexec_pipe()?;
        let stderr_end = write_end.try_clone()?;

        // Command owns the parent's copies of the write end; it must be
        // dropped before reading or EOF never arrives.
        let mut child = {
            let mut command = Command::new(&invocation.program);
            command
                .args(&invocation.args)
                .stdin(Stdio::null())
                .stdout(Stdio::from(write_end))
                .stderr(Stdio::from(stderr_end));
            command
                .spawn()
                .map_err(|e| Self::spawn_failed(invocation, e))?
        };

        debug!(pid = ?child.id(), "Estimator spawned");

        let mut reader = tokio::fs::File::from_std(std::fs::File::from(read_end));
        let mut output = Vec::new();
        let (status, read) = tokio::join!(child.wait(), reader.read_to_end(&mut output));
        read?;

        Ok((status?, output))
    }

    /// Without a shared pipe: stdout followed by stderr
    #[cfg(not(unix))]
    async fn spawn_and_wait(
        &self,
        invocation: &Invocation,
    ) -> Result<(ExitStatus, Vec<u8>), ExecutionError> {
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Self::spawn_failed(invocation, e))?;

        let mut out = child.wait_with_output().await?;
        out.stdout.append(&mut out.stderr);

        Ok((out.status, out.stdout))
    }
}

/// Pipe whose ends are never inherited by other concurrently spawned
/// children. Created close-on-exec atomically where the platform allows.
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "illumos",
    target_os = "solaris"
))]
fn cloexec_pipe() -> std::io::Result<(OwnedFd, OwnedFd)> {
    use nix::fcntl::OFlag;

    Ok(nix::unistd::pipe2(OFlag::O_CLOEXEC)?)
}

// No pipe2 here: a child forked between pipe() and fcntl() can still
// inherit the write end.
#[cfg(all(
    unix,
    not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "illumos",
        target_os = "solaris"
    ))
))]
fn cloexec_pipe() -> std::io::Result<(OwnedFd, OwnedFd)> {
    use nix::fcntl::{fcntl, FcntlArg, FdFlag};
    use std::os::fd::AsRawFd;

    let (read_end, write_end) = nix::unistd::pipe()?;
    for fd in [&read_end, &write_end] {
        fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    }
    Ok((read_end, write_end))
}

#[async_trait]
impl ProcessRunner for SubprocessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
        let start = Instant::now();

        info!(
            program = %invocation.program,
            args = ?invocation.args,
            "Starting estimator"
        );

        let (status, output) = self.spawn_and_wait(invocation).await?;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            program = %invocation.program,
            duration_ms = %duration_ms,
            exit_code = ?status.code(),
            output_bytes = output.len(),
            "Estimator completed"
        );

        Ok(ProcessOutput {
            exit_code: status.code(),
            output,
            duration_ms,
        })
    }
}
