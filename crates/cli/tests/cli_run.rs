//! CLI tests against the built `estimate-bridge` binary
#![cfg(unix)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::Mutex;

const BIN: &str = env!("CARGO_BIN_EXE_estimate-bridge");

/// Stub scripts must not be exec'd while another test holds a write fd
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("klipper_estimator");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn bridge() -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env_remove("ESTIMATE_BRIDGE_PATH")
        .env_remove("ESTIMATE_BRIDGE_CONFIG_KIND")
        .env_remove("ESTIMATE_BRIDGE_CONFIG_ARG")
        .env_remove("ESTIMATE_BRIDGE_SETTINGS")
        .env("RUST_LOG", "off");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_run_file_to_file() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        dir.path(),
        "{ echo '; estimated 42s'; cat \"$4\"; } > \"$4.new\"\nmv \"$4.new\" \"$4\"",
    );
    let input = dir.path().join("in.gcode");
    let output = dir.path().join("out.gcode");
    std::fs::write(&input, "G1 X10\nG1 Y10\n").unwrap();

    let result = bridge()
        .arg("run")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--path")
        .arg(&stub)
        .args(["--config-kind", "file", "--config-arg", "/etc/cfg"])
        .output()
        .unwrap();

    assert!(result.status.success(), "{result:?}");
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "; estimated 42s\nG1 X10\nG1 Y10\n"
    );
}

#[test]
fn test_run_stdin_to_stdout_with_settings_file() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "[ \"$1\" = \"--config_moonraker_url\" ] || exit 9");
    let settings = dir.path().join("estimator.toml");
    std::fs::write(
        &settings,
        format!(
            "path = \"{}\"\nconfig_kind = \"moonraker_url\"\nconfig_arg = \"http://printer.local\"\n",
            stub.display()
        ),
    )
    .unwrap();

    let mut cmd = bridge();
    cmd.arg("run").arg("--settings").arg(&settings);
    let result = run_with_stdin(cmd, "G28\nG1 Z5\n");

    assert!(result.status.success(), "{result:?}");
    assert_eq!(String::from_utf8_lossy(&result.stdout), "G28\nG1 Z5\n");
}

#[test]
fn test_run_failure_exits_non_zero() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "echo 'bad config'\nexit 1");

    let mut cmd = bridge();
    cmd.arg("run").arg("--path").arg(&stub);
    let result = run_with_stdin(cmd, "G1 X10\n");

    assert!(!result.status.success());
    assert!(result.stdout.is_empty());
    assert!(String::from_utf8_lossy(&result.stderr).contains("bad config"));
}

#[test]
fn test_describe_json() {
    let result = bridge().args(["describe", "--json"]).output().unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("\"key\": \"KlipperEstimator\""));
    assert!(stdout.contains("\"config_kind\""));
}
