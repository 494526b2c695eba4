//! Integration tests for the CLI binary
//!
//! These tests run the compiled binary without network access.

use std::io::Write;
use std::process::{Command, Output};

fn fare_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fare-cli"))
        .args(args)
        .env_remove("TAXIFARE_CONFIG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let output = fare_cli(&["--help"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("quote"));
    assert!(text.contains("health"));
}

#[test]
fn version_flag() {
    let output = fare_cli(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("fare-cli "));
}

#[test]
fn quote_without_addresses_is_usage_error() {
    let output = fare_cli(&["quote", "--time", "12:00"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn quote_with_missing_config_file_fails() {
    let output = fare_cli(&[
        "quote",
        "--from",
        "A",
        "--to",
        "B",
        "--time",
        "12:00",
        "--config",
        "/nonexistent/taxifare.toml",
    ]);
    assert!(!output.status.success());
}

#[test]
fn quote_refuses_invalid_config() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[mapbox]
access_token = "pk.test"

[tariff]
night_start_hour = 30
"#
    )
    .unwrap();

    let output = fare_cli(&[
        "quote",
        "--from",
        "A",
        "--to",
        "B",
        "--time",
        "12:00",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tariff"));
}

#[test]
fn health_against_closed_port_is_unhealthy() {
    let output = fare_cli(&["health", "--url", "http://127.0.0.1:1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Unhealthy"));
}
