use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_help_lists_options() {
    let mut cmd = Command::new(cargo_bin!("rfid-till"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--device"))
        .stdout(predicate::str::contains("--baud-rate"))
        .stdout(predicate::str::contains("--db-path"));
}

#[test]
fn test_missing_serial_device_fails() {
    let mut cmd = Command::new(cargo_bin!("rfid-till"));
    cmd.arg("--device").arg("/nonexistent/ttyRFID");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Serial port error"));
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("rfid-till"));
    cmd.arg("--device")
        .arg("/nonexistent/ttyRFID")
        .arg("--db-path")
        .arg("some_db");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}
