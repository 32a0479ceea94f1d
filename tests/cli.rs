mod common;

use std::path::PathBuf;
use std::process::{Command, Output};

use common::make_csv;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("trade_journal_cli_{}_{}", std::process::id(), name))
}

fn journal(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trade-journal"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("LOG_LEVEL", "error")
        .output()
        .expect("failed to launch trade-journal")
}

#[test]
fn no_file_prints_hint() {
    let out = journal(&[]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Upload an IBKR CSV trade report"));
}

#[test]
fn dashboard_shows_metrics() {
    let path = temp_path("ok.csv");
    std::fs::write(&path, make_csv(&[(1, 100.0, 80.0), (0, 50.0, 60.0)])).unwrap();

    let out = journal(&[path.to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("$10.00"));
    assert!(stdout.contains("50.00%"));
    assert!(stdout.contains("$-10.00"));
    assert!(stdout.contains("EQUITY CURVE"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn failure_prints_one_message_and_no_dashboard() {
    let path = temp_path("bad.csv");
    std::fs::write(&path, "Date,Proceeds\n2024-01-01,1\n").unwrap();

    let out = journal(&[path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error processing file: MissingColumnError"), "{stderr}");
    assert!(stderr.contains("CostBasis"), "{stderr}");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_output_and_export() {
    let path = temp_path("json.csv");
    let dir = temp_path("export");
    std::fs::write(&path, make_csv(&[(0, 10.0, 20.0)])).unwrap();

    let out = journal(&[
        path.to_str().unwrap(),
        "--json",
        "--export-dir",
        dir.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["summary"]["total_pnl"], -10.0);
    assert!(json["summary"]["avg_win"].is_null());
    assert!(dir.join("trades.csv").exists());
    assert!(dir.join("equity.csv").exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir_all(&dir);
}
