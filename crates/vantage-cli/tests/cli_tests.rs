//! End-to-end tests for the `vantage` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

const PRICES: &str = "\
date,A,B
2024-01-02,100,50
2024-01-03,101,49
2024-01-04,102,50
2024-01-05,101,51
";

fn price_file(dir: &TempDir) -> String {
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, PRICES).unwrap();
    path.to_string_lossy().into_owned()
}

fn vantage() -> Command {
    let mut cmd = Command::cargo_bin("vantage").unwrap();
    cmd.env_remove("VANTAGE_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// =============================================================================
// ANALYZE
// =============================================================================

#[test]
fn test_analyze_json_report() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let json = json_stdout(vantage().args([
        "analyze", "--prices", prices.as_str(), "--tickers", "A,B", "--weights", "0.6,0.4",
        "--shock", "-0.10", "--value", "1000000", "-f", "json",
    ]));

    let report = &json["report"];
    assert_eq!(report["observations"], 3);
    assert_eq!(report["stress"]["loss"], 0.1);
    assert_eq!(report["parametric_var"]["method"], "parametric");
    assert!(report["cvar"]["cvar"].as_f64().unwrap() >= report["historical_var"]["var"].as_f64().unwrap());
    assert_eq!(json["amounts"]["stress"], 100_000.0);
}

#[test]
fn test_analyze_table() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    vantage()
        .args(["analyze", "-p", prices.as_str(), "-w", "A=0.6,B=0.4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio Risk Report"))
        .stdout(predicate::str::contains("Historical VaR"))
        .stdout(predicate::str::contains("CVaR (Expected Shortfall)"));
}

#[test]
fn test_weights_must_sum_to_one() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    vantage()
        .args(["analyze", "-p", prices.as_str(), "-t", "A,B", "-w", "0.5,0.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Weight mismatch"));

    vantage()
        .args(["analyze", "-p", prices.as_str(), "-t", "A,B", "-w", "0.5,0.3", "--normalize", "-f", "minimal"])
        .assert()
        .success();
}

#[test]
fn test_missing_ticker() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    vantage()
        .args(["var", "-p", prices.as_str(), "-t", "A,ZZZ", "-w", "0.5,0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient data"));
}

#[test]
fn test_invalid_date() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    vantage()
        .args(["cvar", "-p", prices.as_str(), "-w", "0.5,0.5", "--start", "01/02/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

// =============================================================================
// SINGLE FIGURES
// =============================================================================

#[test]
fn test_var_single_method() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let json = json_stdout(vantage().args([
        "var", "-p", prices.as_str(), "-w", "0.6,0.4", "--method", "historical", "--confidence", "0.99",
        "-f", "json",
    ]));

    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["method"], "historical");
    assert_eq!(results[0]["confidence_level"], 0.99);
}

#[test]
fn test_cvar_horizon() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let json = json_stdout(vantage().args([
        "cvar", "-p", prices.as_str(), "-w", "0.6,0.4", "--horizon", "10", "-f", "json",
    ]));
    assert_eq!(json["horizon_days"], 10);
    assert_eq!(json["tail_size"], 1);
}

#[test]
fn test_stress_without_prices() {
    vantage()
        .args(["stress", "-t", "A,B", "-w", "0.6,0.4", "--shock", "-0.10", "-f", "minimal"])
        .assert()
        .success()
        .stdout("0.100000\n");

    vantage()
        .args(["stress", "-w", "A=0.6,B=0.4", "--scenario", "-0.20,-0.05", "-f", "minimal"])
        .assert()
        .success()
        .stdout("0.140000\n");
}

#[test]
fn test_stress_requires_scenario() {
    vantage()
        .args(["stress", "-t", "A,B", "-w", "0.6,0.4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stress scenario"));
}

#[test]
fn test_returns_csv() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let output = vantage()
        .args(["returns", "-p", prices.as_str(), "-w", "0.6,0.4", "-f", "csv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "date,log_return");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2024-01-03,"));
}

#[test]
fn test_positional_weights_follow_header_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unsorted.csv");
    std::fs::write(
        &path,
        "date,ZZZ,AAA\n2024-01-02,100,50\n2024-01-03,110,50\n2024-01-04,110,55\n",
    )
    .unwrap();
    let prices = path.to_string_lossy().into_owned();

    let output = vantage()
        .args(["-f", "minimal", "returns", "-p", prices.as_str(), "-w", "1,0"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let values: Vec<f64> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| l.trim().parse().unwrap())
        .collect();

    // All weight on ZZZ, the first price column
    assert_eq!(values.len(), 2);
    assert!((values[0] - 1.1_f64.ln()).abs() < 1e-12);
    assert!(values[1].abs() < 1e-12);
}

#[test]
fn test_distribution_bins() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let json = json_stdout(vantage().args([
        "distribution", "-p", prices.as_str(), "-w", "0.6,0.4", "--bins", "5", "-f", "json",
    ]));
    assert_eq!(json["histogram"]["bins"].as_array().unwrap().len(), 5);

    vantage()
        .args(["distribution", "-p", prices.as_str(), "-w", "0.6,0.4", "--bins", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VaR 95%"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_init_and_use() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("vantage.toml");
    let config_arg = config.to_string_lossy().into_owned();

    vantage().args(["config", "init", config_arg.as_str()]).assert().success();
    assert!(Path::new(&config).exists());

    vantage()
        .args(["config", "init", config_arg.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    std::fs::write(&config, "confidence_level = 0.99\nstress_shock = -0.2\n").unwrap();

    vantage()
        .args(["--config", config_arg.as_str(), "config", "show", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confidence_level = 0.99"));

    let prices = price_file(&dir);
    let json = json_stdout(vantage().args([
        "--config", config_arg.as_str(), "analyze", "-p", prices.as_str(), "-w", "0.6,0.4", "-f", "json",
    ]));
    assert_eq!(json["report"]["confidence_level"], 0.99);
    assert_eq!(json["report"]["stress"]["loss"], 0.2);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "horizon_days = 0\n").unwrap();

    vantage()
        .args(["--config", config.to_str().unwrap(), "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon_days"));
}
