//! Integration tests for the tripta CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FERRULE_TABLE: &str = "presets_ferrule_din32676a.csv";
const GASKET_TABLE: &str = "presets_gasket_din32676a.csv";

const FERRULE_HEADER: &str = "Size,DN,FlangeOD_mm,C2_mm,TubeID_mm,PassageDia_mm,HeightTube_mm,HeightProfile_mm,SeatLipWidth_mm,Standard";
const GASKET_HEADER: &str =
    "Size,DN,FlangeOD_mm,GasketOD_mm,GasketID_mm,BeadC2_mm,ProfileH_mm,SeatLipWidth_mm,Standard";

/// Helper to get a tripta command
fn tripta() -> Command {
    Command::cargo_bin("tripta").unwrap()
}

fn write_table(dir: &Path, file: &str, header: &str, rows: &[&str]) {
    let mut content = String::from(header);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    fs::write(dir.join(file), content).unwrap();
}

/// Helper to create a data directory with coherent tables for
/// sizes 1.5", 3", and 4"
fn setup_data_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_table(
        tmp.path(),
        FERRULE_TABLE,
        FERRULE_HEADER,
        &[
            "1.5\",DN40,64.0,43.5,38.4,38.0,21.5,4.0,2.0,DIN 32676 A",
            "3\",DN80,106.0,83.5,81.2,81.0,21.5,4.5,2.0,DIN 32676 A",
            "4\",DN100,119.0,97.0,95.0,94.6,21.5,4.5,2.0,DIN 32676 A",
        ],
    );
    write_table(
        tmp.path(),
        GASKET_TABLE,
        GASKET_HEADER,
        &[
            "1.5\",DN40,64.0,64.0,38.4,43.5,4.0,2.0,DIN 32676 A",
            "3\",DN80,106.0,106.0,81.2,83.5,4.5,2.0,DIN 32676 A",
            "4\",DN100,119.0,119.0,95.0,97.0,4.5,2.0,DIN 32676 A",
        ],
    );
    tmp
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    tripta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preset catalog"));
}

#[test]
fn test_version_displays() {
    tripta()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tripta"));
}

// ============================================================================
// List / Show
// ============================================================================

#[test]
fn test_list_all_presets() {
    let tmp = setup_data_dir();
    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ferrule_3.0in_DN80"))
        .stdout(predicate::str::contains("Gasket_1.5in_DN40"))
        .stdout(predicate::str::contains("6 preset(s)"));
}

#[test]
fn test_list_filtered_by_family() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "list",
            "--family",
            "gasket",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gasket_3.0in_DN80"))
        .stdout(predicate::str::contains("Ferrule_").not());
}

#[test]
fn test_list_rejects_unknown_family() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "list",
            "--family",
            "flange",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid family"));
}

#[test]
fn test_show_by_size_prints_parameter_map() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "show",
            "ferrule",
            "--size",
            "3.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ferrule_3.0in_DN80"))
        .stdout(predicate::str::contains("PassageDia_mm"))
        .stdout(predicate::str::contains("ComponentType"));
}

#[test]
fn test_show_by_dn() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "show",
            "gasket",
            "--dn",
            "DN100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gasket_4.0in_DN100"))
        .stdout(predicate::str::contains("GasketID_mm"));
}

#[test]
fn test_show_unknown_size_fails() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "show",
            "ferrule",
            "--size",
            "999",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no ferrule preset"));
}

// ============================================================================
// Sizes / Codes ordering
// ============================================================================

#[test]
fn test_sizes_ascending() {
    let tmp = setup_data_dir();
    let output = tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "sizes"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1.5", "3", "4"]);
}

#[test]
fn test_codes_in_numeric_order() {
    let tmp = TempDir::new().unwrap();
    write_table(
        tmp.path(),
        FERRULE_TABLE,
        FERRULE_HEADER,
        &[
            "4\",DN100,119.0,97.0,95.0,94.6,21.5,4.5,2.0,DIN 32676 A",
            "1.5\",DN40,64.0,43.5,38.4,38.0,21.5,4.0,2.0,DIN 32676 A",
            "3\",DN80,106.0,83.5,81.2,81.0,21.5,4.5,2.0,DIN 32676 A",
        ],
    );
    write_table(tmp.path(), GASKET_TABLE, GASKET_HEADER, &[]);

    let output = tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "codes",
            "--family",
            "ferrule",
        ])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    // Lexicographic order would put DN100 first.
    assert_eq!(lines, vec!["DN40", "DN80", "DN100"]);
}

// ============================================================================
// Pair
// ============================================================================

#[test]
fn test_pair_both_present() {
    let tmp = setup_data_dir();
    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "pair", "3.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ferrule_3.0in_DN80"))
        .stdout(predicate::str::contains("Gasket_3.0in_DN80"))
        .stdout(predicate::str::contains("mate in assembly"));
}

#[test]
fn test_pair_absent_is_not_an_error() {
    let tmp = setup_data_dir();
    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "pair", "999.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no preset").count(2));
}

// ============================================================================
// Status / Check
// ============================================================================

#[test]
fn test_status_loaded() {
    let tmp = setup_data_dir();
    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog loaded"))
        .stdout(predicate::str::contains("total:     6"));
}

#[test]
fn test_status_with_missing_tables_reports_errors() {
    let tmp = TempDir::new().unwrap();
    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog not loaded"))
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_check_passes_on_valid_tables() {
    let tmp = setup_data_dir();
    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 record(s)").count(2));
}

#[test]
fn test_check_missing_column_names_it() {
    let tmp = setup_data_dir();
    // Rewrite the ferrule table without PassageDia_mm.
    let header = FERRULE_HEADER.replace(",PassageDia_mm", "");
    write_table(
        tmp.path(),
        FERRULE_TABLE,
        &header,
        &["3\",DN80,106.0,83.5,81.2,21.5,4.5,2.0,DIN 32676 A"],
    );

    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("PassageDia_mm"));
}

#[test]
fn test_check_gasket_equality_violation() {
    let tmp = setup_data_dir();
    write_table(
        tmp.path(),
        GASKET_TABLE,
        GASKET_HEADER,
        &["3\",DN80,100.0,106.0,81.2,83.5,4.5,2.0,DIN 32676 A"],
    );

    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("row 2"))
        .stdout(predicate::str::contains("FlangeOD must equal GasketOD"));
}

#[test]
fn test_bad_row_aborts_list() {
    let tmp = setup_data_dir();
    write_table(
        tmp.path(),
        FERRULE_TABLE,
        FERRULE_HEADER,
        &[
            "1.5\",DN40,64.0,43.5,38.4,38.0,21.5,4.0,2.0,DIN 32676 A",
            "3\",DN80,106.0,83.5,oops,81.0,21.5,4.5,2.0,DIN 32676 A",
        ],
    );

    tripta()
        .args(["--data-dir", tmp.path().to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 3"))
        .stderr(predicate::str::contains("TubeID_mm"));
}

#[test]
fn test_shipped_tables_are_coherent() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    tripta()
        .args(["--data-dir", data.to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9 record(s)").count(2));
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_generate_table_output() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "generate",
            "ferrule",
            "--size",
            "3.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"))
        .stdout(predicate::str::contains("Ferrule_3.0in_DN80"))
        .stdout(predicate::str::contains("FlangeOD_mm"));
}

#[test]
fn test_generate_json_output() {
    let tmp = setup_data_dir();
    let output = tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "generate",
            "gasket",
            "--dn",
            "DN80",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Gasket_3.0in_DN80");
    assert_eq!(json["family"], "gasket");
    assert_eq!(json["parameters"]["GasketOD_mm"], 106.0);
    assert_eq!(json["parameters"]["ComponentType"], "gasket");
}

#[test]
fn test_generate_requires_size_or_dn() {
    let tmp = setup_data_dir();
    tripta()
        .args([
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "generate",
            "ferrule",
        ])
        .assert()
        .failure();
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_list_shows_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("tripta_config.json");
    tripta()
        .args(["--config", config.to_str().unwrap(), "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("units = \"mm\""))
        .stdout(predicate::str::contains("backup_interval_hours = 24"));
    assert!(config.exists());
}

#[test]
fn test_config_set_and_get_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("tripta_config.json");
    let config_arg = config.to_str().unwrap();

    tripta()
        .args(["--config", config_arg, "config", "set", "units", "in"])
        .assert()
        .success();
    tripta()
        .args(["--config", config_arg, "config", "get", "units"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"in\""));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("tripta_config.json");
    tripta()
        .args([
            "--config",
            config.to_str().unwrap(),
            "config",
            "set",
            "frobnicate",
            "yes",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown setting"));
}

#[test]
fn test_config_path() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("nested").join("tripta_config.json");
    tripta()
        .args(["--config", config.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tripta_config.json"));
}
