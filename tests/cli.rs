//! End-to-end smoke tests for the `sitebid` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sitebid(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sitebid").unwrap();
    cmd.env("SITEBID_DATA_DIR", dir.path());
    cmd.env_remove("SITEBID_LOG");
    cmd
}

/// Initialized data dir with one flooring project worth 90,000
fn flooring_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    sitebid(&dir).arg("init").assert().success();
    sitebid(&dir)
        .args(["project", "create", "Kim house", "--client", "Mr. Kim"])
        .assert()
        .success();
    sitebid(&dir)
        .args([
            "item", "add", "Kim house", "flooring", "Oak", "-q", "10", "-u", "m2", "-m", "5000",
            "-l", "3000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("80,000"));
    dir
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    sitebid(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("projects.json").exists());

    sitebid(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn test_categories() {
    let dir = TempDir::new().unwrap();
    sitebid(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("waste_disposal"))
        .stdout(predicate::str::contains("Flooring"));
}

#[test]
fn test_estimate_report() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["report", "estimate", "Kim house"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONTRACT TOTAL"))
        .stdout(predicate::str::contains("90,000"));
}

#[test]
fn test_estimate_report_csv() {
    let dir = flooring_project();
    let out = dir.path().join("estimate.csv");
    sitebid(&dir)
        .args(["report", "estimate", "Kim house", "-o"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Line,Category,Items"));
    assert!(text.contains("final_total,,,,,,90000.00,"));
}

#[test]
fn test_project_list_and_show() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kim house"))
        .stdout(predicate::str::contains("Mr. Kim"));

    sitebid(&dir)
        .args(["project", "show", "kim house"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: Kim house"))
        .stdout(predicate::str::contains("Oak"));
}

#[test]
fn test_overdue_payment_is_a_risk() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["payment", "add", "Kim house", "Deposit", "30", "--due", "2025-01-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("27,000"));

    sitebid(&dir)
        .args(["report", "risks", "Kim house", "--as-of", "2025-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HIGH"))
        .stdout(predicate::str::contains("Deposit"));

    sitebid(&dir)
        .args(["payment", "paid", "Kim house", "Deposit", "--date", "2025-01-20"])
        .assert()
        .success();

    sitebid(&dir)
        .args(["report", "risks", "Kim house", "--as-of", "2025-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No risks detected."));
}

#[test]
fn test_cost_records_flow_into_summary() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["cost", "order", "Kim house", "Floor Mart", "50000"])
        .assert()
        .success();
    sitebid(&dir)
        .args(["cost", "labor", "Kim house", "Choi", "20000", "--days", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("40,000"));
    sitebid(&dir)
        .args(["cost", "expense", "Kim house", "Parking", "1000", "--approved"])
        .assert()
        .success();

    sitebid(&dir)
        .args(["cost", "list", "Kim house"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Floor Mart"))
        .stdout(predicate::str::contains("Actual cost: ₩91,000"));

    sitebid(&dir)
        .args(["report", "summary", "Kim house"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Execution rate"))
        .stdout(predicate::str::contains("91,000"));
}

#[test]
fn test_output_follows_configured_symbol_and_date_format() {
    let dir = flooring_project();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"currency_symbol": "$", "date_format": "%d/%m/%Y"}"#,
    )
    .unwrap();

    sitebid(&dir)
        .args(["payment", "add", "Kim house", "Deposit", "30", "--due", "2025-01-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$27,000"))
        .stdout(predicate::str::contains("Due: 10/01/2025"));

    sitebid(&dir)
        .args(["report", "summary", "Kim house", "--as-of", "2025-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as of 01/02/2025"))
        .stdout(predicate::str::contains("$90,000"))
        .stdout(predicate::str::contains("₩").not());
}

#[test]
fn test_export_json_and_yaml() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["export", "Kim house"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\": \"1.0.0\""))
        .stdout(predicate::str::contains("\"name\": \"Kim house\""));

    let out = dir.path().join("kim.yaml");
    sitebid(&dir)
        .args(["export", "Kim house", "--format", "yaml", "-o"])
        .arg(&out)
        .assert()
        .success();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("name: Kim house"));
}

#[test]
fn test_unknown_project_fails() {
    let dir = TempDir::new().unwrap();
    sitebid(&dir)
        .args(["report", "estimate", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found: Nowhere"));
}

#[test]
fn test_delete_requires_force() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["project", "delete", "Kim house"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    sitebid(&dir)
        .args(["project", "delete", "Kim house", "--force"])
        .assert()
        .success();
    sitebid(&dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));
}

#[test]
fn test_config_history() {
    let dir = flooring_project();
    sitebid(&dir)
        .args(["config", "--history", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent changes:"))
        .stdout(predicate::str::contains("Kim house"));
}
