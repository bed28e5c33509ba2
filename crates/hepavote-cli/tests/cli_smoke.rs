//! CLI binary smoke tests using assert_cmd.
//!
//! These tests run the compiled `hepavote` binary against small model
//! artifacts written to a temporary directory.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

fn cmd() -> Command {
    Command::cargo_bin("hepavote").unwrap()
}

fn row(total_bilirubin: f64) -> Vec<f64> {
    vec![45.0, 1.0, total_bilirubin, total_bilirubin / 2.0, 190.0, 25.0, 30.0, 6.8, 3.3, 0.9]
}

fn identity_scaler() -> serde_json::Value {
    json!({ "center": vec![0.0; 10], "scale": vec![1.0; 10] })
}

fn knn_json() -> serde_json::Value {
    json!({
        "scaler": identity_scaler(),
        "k": 1,
        "points": [row(0.7), row(8.0)],
        "labels": [0, 1],
    })
}

fn bundle_json() -> serde_json::Value {
    let mut sv = vec![0.0; 10];
    sv[2] = 1.0;
    json!({
        "knn": knn_json(),
        "random_forest": {
            "scaler": identity_scaler(),
            "trees": [{
                "nodes": [
                    { "type": "split", "feature": 2, "threshold": 2.0, "left": 1, "right": 2 },
                    { "type": "leaf", "counts": [9.0, 1.0] },
                    { "type": "leaf", "counts": [1.0, 9.0] },
                ]
            }],
        },
        "svm": {
            "scaler": identity_scaler(),
            "kernel": "linear",
            "support_vectors": [sv],
            "dual_coef": [1.0],
            "intercept": -2.0,
        },
        "metrics": { "ensemble_accuracy": 0.7414 },
    })
}

fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Temp dir holding a bundle and a fallback k-NN.
fn artifacts() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("voting_ensemble_model.json");
    let fallback = dir.path().join("knn_best_model.json");
    write_json(&bundle, &bundle_json());
    write_json(&fallback, &knn_json());
    (dir, bundle, fallback)
}

const SICK: &str = "45,1,7.5,3.75,190,25,30,6.8,3.3,0.9";
const HEALTHY: &str = "45,1,0.8,0.4,190,25,30,6.8,3.3,0.9";

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn features_lists_all_columns() {
    cmd()
        .arg("features")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 features"))
        .stdout(predicate::str::contains("Albumin_and_Globulin_Ratio"));
}

// ---------------------------------------------------------------------------
// Model loading
// ---------------------------------------------------------------------------

#[test]
fn info_reports_full_mode() {
    let (_dir, bundle, fallback) = artifacts();
    cmd()
        .arg("info")
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"full\""))
        .stdout(predicate::str::contains("0.7414"));
}

#[test]
fn info_reports_degraded_mode() {
    let (dir, _bundle, fallback) = artifacts();
    cmd()
        .arg("info")
        .arg("--bundle")
        .arg(dir.path().join("absent.json"))
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"degraded\""));
}

#[test]
fn missing_artifacts_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .env("HEPAVOTE_LOG", "error")
        .arg("info")
        .arg("--bundle")
        .arg(dir.path().join("a.json"))
        .arg("--fallback")
        .arg(dir.path().join("b.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable model artifact"));
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

#[test]
fn predict_values_in_full_mode() {
    let (_dir, bundle, fallback) = artifacts();
    cmd()
        .args(["predict", "--values", SICK])
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success()
        .stdout(predicate::str::contains("Liver Disease Detected"))
        .stdout(predicate::str::contains("\"agreement\": 3"));
}

#[test]
fn predict_with_user_emits_record() {
    let (_dir, bundle, fallback) = artifacts();
    cmd()
        .args(["predict", "--values", HEALTHY, "--user", "alice"])
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success()
        .stdout(predicate::str::contains("No Liver Disease"))
        .stdout(predicate::str::contains("\"user\": \"alice\""))
        .stdout(predicate::str::contains("\"gender\": \"Male\""));
}

#[test]
fn predict_from_json_file() {
    let (dir, bundle, fallback) = artifacts();
    let input = dir.path().join("patient.json");
    let names = [
        "Age",
        "Gender",
        "Total_Bilirubin",
        "Direct_Bilirubin",
        "Alkaline_Phosphotase",
        "Alamine_Aminotransferase",
        "Aspartate_Aminotransferase",
        "Total_Proteins",
        "Albumin",
        "Albumin_and_Globulin_Ratio",
    ];
    let object: serde_json::Map<String, serde_json::Value> = names
        .iter()
        .zip(row(7.5))
        .map(|(name, v)| (name.to_string(), json!(v)))
        .collect();
    write_json(&input, &serde_json::Value::Object(object));

    cmd()
        .arg("predict")
        .arg("--input")
        .arg(&input)
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success()
        .stdout(predicate::str::contains("Liver Disease Detected"));
}

#[test]
fn predict_malformed_values_fails() {
    let (_dir, bundle, fallback) = artifacts();
    cmd()
        .args(["predict", "--values", "45,1,abc"])
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Prediction failed"));
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

fn write_patients(dir: &Path) -> PathBuf {
    let path = dir.join("patients.csv");
    let header = "Age,Gender,Total_Bilirubin,Direct_Bilirubin,Alkaline_Phosphotase,\
Alamine_Aminotransferase,Aspartate_Aminotransferase,Total_Proteins,Albumin,Albumin_and_Globulin_Ratio";
    std::fs::write(&path, format!("{}\n{}\n{}\n", header, HEALTHY, SICK)).unwrap();
    path
}

#[test]
fn batch_writes_tsv_output() {
    let (dir, bundle, fallback) = artifacts();
    let input = write_patients(dir.path());
    let output = dir.path().join("scored.tsv");

    cmd()
        .arg("batch")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("index\tprediction\tstatus"));
    assert!(lines[1].starts_with("0\t0\tNo Liver Disease"));
    assert!(lines[2].starts_with("1\t1\tLiver Disease Detected"));
}

#[test]
fn batch_legacy_inversion_flips_labels() {
    let (dir, bundle, fallback) = artifacts();
    let input = write_patients(dir.path());

    cmd()
        .arg("batch")
        .arg(&input)
        .arg("--legacy-inversion")
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .success()
        .stdout(predicate::str::contains("0\t1\tLiver Disease Detected"))
        .stdout(predicate::str::contains("1\t0\tNo Liver Disease"));
}

#[test]
fn batch_rejects_unknown_extension() {
    let (dir, bundle, fallback) = artifacts();
    let input = dir.path().join("patients.txt");
    std::fs::write(&input, "Age\n1\n").unwrap();

    cmd()
        .arg("batch")
        .arg(&input)
        .arg("--bundle")
        .arg(&bundle)
        .arg("--fallback")
        .arg(&fallback)
        .assert()
        .failure();
}
