//! End-to-end tests for the pestmap binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Command wired to a scratch database and a config file that does not exist.
fn pestmap(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("pestmap");
    cmd.env_remove("RUST_LOG")
        .env_remove("PESTMAP_FORMAT")
        .arg("--quiet")
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--database")
        .arg(dir.path().join("data").join("detections.db"));
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_init_seeds_then_is_a_no_op() {
    let dir = TempDir::new().unwrap();

    pestmap(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 135 districts"));

    pestmap(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already holds 135 districts"));
}

#[test]
fn test_districts_list_csv() {
    let dir = TempDir::new().unwrap();
    pestmap(&dir).arg("init").assert().success();

    pestmap(&dir)
        .args(["districts", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,latitude,longitude\n"))
        .stdout(predicate::str::contains("Kampala,0.3476,32.5825"));
}

#[test]
fn test_nearest_resolves_kampala() {
    let dir = TempDir::new().unwrap();
    pestmap(&dir).arg("init").assert().success();

    let value = stdout_json(pestmap(&dir).args([
        "nearest", "--lat", "0.35", "--lon", "32.58", "--format", "json",
    ]));
    assert_eq!(value["event"], "result");
    assert_eq!(value["payload"]["result_type"], "nearest");
    assert_eq!(value["payload"]["rows"][0]["name"], "Kampala");
}

#[test]
fn test_record_then_map() {
    let dir = TempDir::new().unwrap();
    pestmap(&dir)
        .args(["districts", "add", "Gulu", "--lat", "2.7747", "--lon", "32.299"])
        .assert()
        .success();

    pestmap(&dir)
        .args([
            "record",
            "--result",
            "Fall Armyworm Larval Damage",
            "--confidence",
            "92",
            "--district",
            "Gulu",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("fall-armyworm-larval-damage"))
        .stdout(predicate::str::contains("0.9200"));

    pestmap(&dir)
        .args([
            "record",
            "--result-json",
            r#"{"result": "Healthy Maize", "confidence": 40}"#,
            "--lat",
            "2.7",
            "--lon",
            "32.3",
        ])
        .assert()
        .success();

    let map = stdout_json(pestmap(&dir).args(["map", "--format", "json"]));
    assert_eq!(map["payload"]["count"], 1);
    assert_eq!(map["payload"]["rows"][0]["district"], "Gulu");
    assert_eq!(map["payload"]["rows"][0]["detection_type"], "healthy-maize");
    assert_eq!(map["payload"]["rows"][0]["confidence"], 0.4);

    let history = stdout_json(pestmap(&dir).args([
        "detections",
        "--district",
        "Gulu",
        "--format",
        "json",
    ]));
    assert_eq!(history["payload"]["count"], 2);
}

#[test]
fn test_record_without_districts_fails() {
    let dir = TempDir::new().unwrap();

    pestmap(&dir)
        .args(["record", "--result", "Healthy Maize", "--lat", "0", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: no districts available"));
}

#[test]
fn test_unknown_district_json_error_envelope() {
    let dir = TempDir::new().unwrap();
    pestmap(&dir).arg("init").assert().success();

    let mut cmd = pestmap(&dir);
    cmd.args([
        "record",
        "--result",
        "Healthy Maize",
        "--district",
        "Atlantis",
        "--format",
        "json",
    ]);
    cmd.assert().failure();

    let value = stdout_json(&mut cmd);
    assert_eq!(value["event"], "error");
    assert_eq!(value["payload"]["code"], "unknown_district");
    assert_eq!(value["payload"]["kind"], "domain");
    assert_eq!(value["payload"]["retryable"], false);
}

#[test]
fn test_detector_failure_records_nothing() {
    let dir = TempDir::new().unwrap();
    pestmap(&dir).arg("init").assert().success();

    pestmap(&dir)
        .args([
            "record",
            "--result-json",
            r#"{"error": "model not loaded"}"#,
            "--district",
            "Kampala",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("classification failed: model not loaded"));

    pestmap(&dir)
        .args(["detections", "--format", "csv"])
        .assert()
        .success()
        .stdout("district,latitude,longitude,detection_type,confidence,timestamp\n");
}

#[test]
fn test_duplicate_district_rejected() {
    let dir = TempDir::new().unwrap();
    pestmap(&dir)
        .args(["districts", "add", "Kasese", "--lat", "0.18", "--lon", "30.08"])
        .assert()
        .success();

    pestmap(&dir)
        .args(["districts", "add", "Kasese", "--lat", "1", "--lon", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Kasese' already exists"));
}

#[test]
fn test_config_init_and_path() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    pestmap(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config_path.to_string_lossy().as_ref()));

    pestmap(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config_path.exists());

    pestmap(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("busy_timeout_ms = 5000"));
}

#[test]
fn test_seed_file_from_config() {
    let dir = TempDir::new().unwrap();
    let seed = dir.path().join("districts.csv");
    std::fs::write(&seed, "name,latitude,longitude\nNorth,1.0,1.0\nSouth,-1.0,1.0\n").unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[seed]\nfile = {:?}\n", seed.to_string_lossy()),
    )
    .unwrap();

    pestmap(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 2 districts"));

    let value = stdout_json(pestmap(&dir).args([
        "nearest", "--lat", "-0.9", "--lon", "1", "--format", "json",
    ]));
    assert_eq!(value["payload"]["rows"][0]["name"], "South");
}

#[test]
fn test_non_numeric_coordinate_json_error_envelope() {
    let dir = TempDir::new().unwrap();

    let mut cmd = pestmap(&dir);
    cmd.args(["nearest", "--lat", "abc", "--lon", "1", "--format", "json"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("error: malformed input"));

    let value = stdout_json(&mut cmd);
    assert_eq!(value["event"], "error");
    assert_eq!(value["payload"]["code"], "malformed_input");
    assert_eq!(value["payload"]["kind"], "domain");
    assert_eq!(value["payload"]["retryable"], false);
}

#[test]
fn test_help_still_exits_cleanly() {
    let dir = TempDir::new().unwrap();

    pestmap(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_bad_result_json_leaves_database_untouched() {
    let dir = TempDir::new().unwrap();

    pestmap(&dir)
        .args(["record", "--result-json", "not json", "--district", "Kampala"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid JSON"));

    assert!(!dir.path().join("data").join("detections.db").exists());
}
