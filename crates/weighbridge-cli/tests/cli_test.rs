//! End-to-end runs of the `weighbridge` binary against a temp data dir

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn run(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weighbridge"))
        .args(args)
        .arg("--data-dir")
        .arg(data_dir.join("data"))
        // Keep the user's config out of the run
        .env("XDG_CONFIG_HOME", data_dir.join("config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run weighbridge")
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_weigh_then_show() {
    let dir = tempdir().unwrap();
    let saved = json(&run(
        dir.path(),
        &[
            "weigh", "--vehicle", "ABC123GP", "--customer", "acme", "--first", "35420",
            "--second", "12500", "--format", "json",
        ],
    ));
    assert_eq!(saved["transaction_no"], "000001");
    assert_eq!(saved["net_mass"], 22920.0);
    assert_eq!(saved["status"], "Complete");

    let shown = json(&run(dir.path(), &["show", "000001", "--format", "json"]));
    assert_eq!(shown["transaction"]["vehicle_registration"], "ABC123GP");
}

#[test]
fn test_pending_then_complete() {
    let dir = tempdir().unwrap();
    let pending = json(&run(
        dir.path(),
        &[
            "weigh", "--vehicle", "DEF456GP", "--customer", "global", "--type", "dispatch",
            "--first", "14200", "--format", "json",
        ],
    ));
    assert_eq!(pending["status"], "Pending");
    assert_eq!(pending["net_mass"], Value::Null);

    let completed = json(&run(
        dir.path(),
        &["complete", "000001", "--second", "38650", "--format", "json"],
    ));
    assert_eq!(completed["transaction_no"], "000001");
    assert_eq!(completed["net_mass"], -24450.0);

    let listed = json(&run(dir.path(), &["transactions", "--format", "json"]));
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn test_unknown_customer_fails() {
    let dir = tempdir().unwrap();
    let output = run(
        dir.path(),
        &["weigh", "--vehicle", "ABC123GP", "--customer", "nobody", "--first", "35420"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown customer: nobody"), "stderr: {}", stderr);
}

#[test]
fn test_zero_first_mass_reports_scale_not_ready() {
    let dir = tempdir().unwrap();
    let output = run(
        dir.path(),
        &["weigh", "--vehicle", "ABC123GP", "--customer", "acme", "--first", "0"],
    );
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Scale Not Ready"), "stdout: {}", stdout);

    let listed = json(&run(dir.path(), &["transactions", "--format", "json"]));
    assert!(listed.as_array().unwrap().is_empty());
}

#[test]
fn test_summary_over_range_by_customer() {
    let dir = tempdir().unwrap();
    for (vehicle, customer, second) in [
        ("ABC123GP", "acme", "12500"),
        ("DEF456GP", "global", "20000"),
        ("GHI321GP", "acme", "10000"),
    ] {
        json(&run(
            dir.path(),
            &[
                "weigh", "--vehicle", vehicle, "--customer", customer, "--first", "35420",
                "--second", second, "--format", "json",
            ],
        ));
    }

    let summary = json(&run(
        dir.path(),
        &["summary", "--from", "2000-01-01", "--period", "yearly", "--by-customer", "--format", "json"],
    ));
    assert_eq!(summary["weighings"], 3);
    assert_eq!(summary["period"], "yearly");
    assert_eq!(summary["by_type"]["receipts"], 3);
    let customers = summary["by_customer"].as_array().unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0]["customer_id"], "acme");
    assert_eq!(customers[0]["transactions"], 2);
    assert_eq!(customers[0]["net_mass_kg"], 22920.0 + 25420.0);

    let table = run(dir.path(), &["summary", "--to", "2000-12-31", "--from", "2000-01-01"]);
    assert!(table.status.success());
    assert!(String::from_utf8_lossy(&table.stdout).contains("No transactions in range."));
}

#[test]
fn test_simulate_is_reproducible_with_seed() {
    let dir = tempdir().unwrap();
    let output = run(dir.path(), &["simulate", "--seed", "7"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Transaction Saved"));
    assert!(stdout.contains("Net mass:"));
}
