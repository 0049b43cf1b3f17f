//! Process-level checks for the serve command

use std::net::TcpListener;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("bookings").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--db-host"))
        .stdout(predicate::str::contains("--cors-origin"));
}

#[test]
fn test_unreachable_database_exits_nonzero_without_binding() {
    let port = free_port();

    let mut cmd = Command::cargo_bin("bookings").unwrap();
    cmd.env_remove("DATABASE_URL")
        .args(["serve", "--bind", "127.0.0.1", "--port"])
        .arg(port.to_string())
        .args(["--db-host", "127.0.0.1", "--db-port", "1", "--connect-timeout-secs", "1"])
        .timeout(Duration::from_secs(30));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to connect to database"));

    // Port was never taken
    assert!(TcpListener::bind(("127.0.0.1", port)).is_ok());
}
