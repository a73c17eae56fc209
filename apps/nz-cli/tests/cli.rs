//! End-to-end tests for the `nozzle-cli` binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    cargo_bin_cmd!("nozzle-cli")
}

#[test]
fn solve_defaults_prints_exit_state() {
    cli()
        .arg("solve")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mach number:          3.17"))
        .stdout(predicate::str::contains("Shocks expected in real flow"));
}

#[test]
fn solve_json_is_machine_readable() {
    let output = cli()
        .args(["solve", "--area-ratio", "1.5", "--format", "json"])
        .output()
        .expect("run solve");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let mach = report["exit"]["mach"].as_f64().expect("mach");
    assert!((mach - 1.854).abs() < 0.01);
    assert!(report.get("contour_points").is_none());
}

#[test]
fn matched_back_pressure_is_perfectly_expanded() {
    cli()
        .args(["solve", "--pe", "21200", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("regime: perfectly_expanded"));
}

#[test]
fn invalid_area_ratio_fails() {
    cli()
        .args(["solve", "--area-ratio", "0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("area ratio"));
}

#[test]
fn contour_writes_csv() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wall.csv");

    cli()
        .args(["contour", "--samples", "20", "--lower", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 20 contour points"));

    let csv = std::fs::read_to_string(&path).expect("csv written");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("x_m,r_upper_m,r_lower_m"));
    assert_eq!(lines.count(), 20);
}

#[test]
fn init_then_validate_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("design.yaml");

    cli().arg("init").arg(&path).assert().success();
    cli()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Design is valid"));

    // A second init without --force must not clobber the file.
    cli().arg("init").arg(&path).assert().failure();
    cli().arg("init").arg(&path).arg("--force").assert().success();
}

#[test]
fn sweep_reports_failed_points() {
    cli()
        .args([
            "sweep",
            "--parameter",
            "area-ratio",
            "--start",
            "0.5",
            "--end",
            "2.5",
            "--points",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("failed: Invalid parameter"))
        .stdout(predicate::str::contains("4 succeeded, 1 failed"));
}

#[test]
fn unknown_sweep_parameter_is_rejected() {
    cli()
        .args(["sweep", "--parameter", "mach", "--start", "1", "--end", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sweep parameter"));
}
