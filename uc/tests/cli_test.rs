//! Binary tests for the `uc` one-shot subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `uc` isolated from the user's config, .env and log directory
fn uc(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("uc").expect("uc binary");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_DATA_HOME", home.path().join(".local/share"))
        .env_remove("EXCHANGE_RATE_API_KEY");
    cmd
}

#[test]
fn test_convert_temperature() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["convert", "temperature", "0", "celsius", "fahrenheit"])
        .assert()
        .success()
        .stdout("32\n");
}

#[test]
fn test_convert_negative_temperature() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["convert", "temperature", "-40", "c", "f"])
        .assert()
        .success()
        .stdout("-40\n");
}

#[test]
fn test_convert_distance() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["convert", "distance", "1", "mile", "m"])
        .assert()
        .success()
        .stdout("1609.34\n");
}

#[test]
fn test_convert_unsupported_distance_fails() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["convert", "distance", "1", "lightyear", "m"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported yet"));
}

#[test]
fn test_convert_currency_without_key_fails() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["convert", "currency", "10", "usd", "eur"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EXCHANGE_RATE_API_KEY"));
}

#[test]
fn test_tools_lists_declarations() {
    let home = TempDir::new().unwrap();
    let output = uc(&home).arg("tools").assert().success().get_output().stdout.clone();

    let tools: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["function"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["convert_currency", "convert_distance", "convert_temperature"]);
}

#[test]
fn test_explicit_missing_config_fails() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["--config", "nope.yml", "tools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}
