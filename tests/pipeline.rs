//! End-to-end checks of the startup pipeline: load, split, partition, fit,
//! evaluate.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use serde_json::{json, Value};

use points_eval::error::StartupError;
use points_eval::{bootstrap, Settings};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("points-eval-it-{}-{}", std::process::id(), name))
}

/// n records following points = 2 * minutes + 1 exactly.
fn linear_dataset(name: &str, n: usize) -> PathBuf {
    let records: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "minutes": i as f64,
                "points": 2.0 * i as f64 + 1.0,
            })
        })
        .collect();

    let path = temp_path(name);
    std::fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
    path
}

fn settings(dataset: PathBuf, dump: &str) -> Settings {
    Settings::default()
        .with_dataset_path(dataset)
        .with_predictions_path(temp_path(dump))
}

#[test]
fn noiseless_linear_data_evaluates_perfectly() {
    let settings = settings(linear_dataset("scenario-a.json", 100), "scenario-a-dump.json");
    let evaluator = bootstrap(&settings).unwrap();
    let evaluation = evaluator.evaluate().unwrap();

    assert_abs_diff_eq!(evaluation.mse, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(evaluation.mae, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(evaluation.r2, 1.0, epsilon = 1e-6);

    assert_abs_diff_eq!(evaluator.model().params()[0], 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(evaluator.model().intercept(), 1.0, epsilon = 1e-6);
}

#[test]
fn missing_target_column_aborts_startup() {
    let records: Vec<Value> = (0..10)
        .map(|i| json!({ "minutes": i as f64, "rebounds": i as f64 }))
        .collect();
    let path = temp_path("scenario-b.json");
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

    let result = bootstrap(&settings(path, "scenario-b-dump.json"));
    assert!(matches!(result, Err(StartupError::Schema(_))));
}

#[test]
fn missing_dataset_file_aborts_startup() {
    let result = bootstrap(&settings(
        PathBuf::from("/nonexistent/players.json"),
        "missing-dump.json",
    ));
    assert!(matches!(result, Err(StartupError::Load(_))));
}

#[test]
fn predictions_dump_length_tracks_the_test_partition() {
    // 100 rows, ratio 0.2 -> a test partition of 20, whatever the feature
    // count
    let records: Vec<Value> = (0..100)
        .map(|i| {
            json!({
                "minutes": i as f64,
                "rebounds": (i % 11) as f64,
                "assists": (i % 7) as f64,
                "points": 1.5 * i as f64 + 3.0,
            })
        })
        .collect();
    let path = temp_path("scenario-d.json");
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

    let settings = settings(path, "scenario-d-dump.json");
    let evaluator = bootstrap(&settings).unwrap();
    assert_eq!(evaluator.test_set().nsamples(), 20);

    evaluator.evaluate().unwrap();

    let dump: Value =
        serde_json::from_str(&std::fs::read_to_string(&settings.predictions_path).unwrap())
            .unwrap();
    assert_eq!(dump["predictions"].as_array().unwrap().len(), 20);
}

#[test]
fn repeated_bootstraps_are_byte_for_byte_identical() {
    let dataset = linear_dataset("determinism.json", 60);

    let first = bootstrap(&settings(dataset.clone(), "determinism-dump-a.json")).unwrap();
    let second = bootstrap(&settings(dataset, "determinism-dump-b.json")).unwrap();

    assert_eq!(first.model(), second.model());
    assert_eq!(first.test_set(), second.test_set());

    let eval_a = first.evaluate().unwrap();
    let eval_b = second.evaluate().unwrap();
    assert_eq!(eval_a, eval_b);
}
