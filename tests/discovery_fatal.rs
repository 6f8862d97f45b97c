//! Zero-endpoint discovery must exit non-zero with a clear message and
//! never reach the render loop.

use assert_cmd::Command;

#[test]
fn exits_fatal_when_nothing_to_display() {
    let empty = tempfile::tempdir().expect("tempdir");
    let assert = Command::cargo_bin("qattop")
        .expect("qattop binary")
        .env("QATTOP_STATUS_CMD", "true")
        .env("QATTOP_SYSFS_ROOT", empty.path())
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(
        stderr.contains("no telemetry-capable"),
        "stderr missing fatal message:\n{stderr}"
    );
}

#[test]
fn failed_status_command_degrades_to_fatal_discovery() {
    let empty = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("qattop")
        .expect("qattop binary")
        // unreachable binary: runner degrades to empty output, which
        // cascades into the zero-endpoint fatal path
        .env("QATTOP_STATUS_CMD", "/definitely/not/adf_ctl status")
        .env("QATTOP_SYSFS_ROOT", empty.path())
        .assert()
        .failure();
}
