//! The evaluation pipeline.
//!
//! Assembled once at startup by [`bootstrap`], an [`Evaluator`] holds the
//! fitted model and the held-out test partition as immutable state. Every
//! call to [`Evaluator::evaluate`] predicts over the test partition, scores
//! the predictions and persists them, then returns the metrics.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use ndarray::Array1;
use serde::Serialize;

use crate::config::Settings;
use crate::dataset::{Dataset, Table};
use crate::error::{EvalError, StartupError};
use crate::linear::{FittedLinearRegression, LinearRegression};
use crate::metrics::Regression;

/// The three regression metrics reported per evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub mse: f64,
    pub mae: f64,
    pub r2: f64,
}

#[derive(Serialize)]
struct PredictionsFile<'a> {
    predictions: &'a [f64],
}

/// Fitted model plus held-out test partition, shared read-only across
/// evaluation calls.
pub struct Evaluator {
    model: FittedLinearRegression,
    test: Dataset,
    predictions_path: PathBuf,
}

impl Evaluator {
    pub fn new(model: FittedLinearRegression, test: Dataset, predictions_path: PathBuf) -> Self {
        Evaluator {
            model,
            test,
            predictions_path,
        }
    }

    pub fn model(&self) -> &FittedLinearRegression {
        &self.model
    }

    pub fn test_set(&self) -> &Dataset {
        &self.test
    }

    /// Run one evaluation pass over the test partition.
    ///
    /// Predictions are computed in test-row order, scored with MSE, MAE and
    /// R², and written as indented JSON to the predictions path, overwriting
    /// any previous dump. A failed write discards the metrics: repeated
    /// calls over the unchanged model and partition otherwise return
    /// identical results.
    pub fn evaluate(&self) -> Result<Evaluation, EvalError> {
        if self.test.nsamples() == 0 {
            return Err(EvalError::EmptyTestSet);
        }
        if self.test.nfeatures() != self.model.params().len() {
            return Err(EvalError::FeatureMismatch {
                expected: self.model.params().len(),
                actual: self.test.nfeatures(),
            });
        }

        let y_pred = self.model.predict(self.test.records().view());
        let y_test = self.test.targets().view();

        let evaluation = Evaluation {
            mse: y_pred.mean_squared_error(y_test),
            mae: y_pred.mean_absolute_error(y_test),
            r2: y_pred.r2(y_test),
        };

        self.write_predictions(&y_pred)?;

        Ok(evaluation)
    }

    fn write_predictions(&self, y_pred: &Array1<f64>) -> Result<(), EvalError> {
        let predictions = y_pred.to_vec();
        let payload = PredictionsFile {
            predictions: &predictions,
        };

        let file = File::create(&self.predictions_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &payload)?;
        writer.flush()?;
        Ok(())
    }
}

/// Load the dataset, partition it, fit the model and assemble the evaluator.
///
/// Runs exactly once at process startup; every failure here is fatal since
/// there is no fallback model to serve.
pub fn bootstrap(settings: &Settings) -> Result<Evaluator, StartupError> {
    settings.check()?;

    let table = Table::from_json_file(&settings.dataset_path)?;
    log::info!(
        "loaded {} records with {} columns from {}",
        table.nsamples(),
        table.columns().len(),
        settings.dataset_path.display()
    );

    let dataset = table
        .split_target(&settings.target_column)?
        .into_dataset()?;
    let (train, test) = dataset.train_test_split(settings.test_ratio, settings.seed);
    log::info!(
        "partitioned into {} training and {} test rows",
        train.nsamples(),
        test.nsamples()
    );

    let model = LinearRegression::new().fit(&train)?;
    log::info!(
        "fitted model: params {} intercept {}",
        model.params(),
        model.intercept()
    );

    Ok(Evaluator::new(
        model,
        test,
        settings.predictions_path.clone(),
    ))
}
