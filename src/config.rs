//! Runtime settings for the evaluation service.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::StartupError;

/// Everything the service needs to know at startup.
///
/// The defaults reproduce the fixed constants of the reference deployment;
/// tests override individual fields through the `with_*` builders to run
/// against fixture datasets without touching process state.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Array-of-records JSON file read once at startup.
    pub dataset_path: PathBuf,
    /// Predictions dump, overwritten on every evaluation call.
    pub predictions_path: PathBuf,
    /// Column to regress on; every other column becomes a feature.
    pub target_column: String,
    /// Fraction of rows held out for evaluation.
    pub test_ratio: f64,
    /// Seed for the shuffled train/test partition.
    pub seed: u64,
    pub bind_addr: SocketAddr,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dataset_path: PathBuf::from("nba_data.json"),
            predictions_path: PathBuf::from("nba_predictions.json"),
            target_column: "points".to_string(),
            test_ratio: 0.2,
            seed: 42,
            bind_addr: ([0, 0, 0, 0], 5000).into(),
        }
    }
}

impl Settings {
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    pub fn with_predictions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.predictions_path = path.into();
        self
    }

    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = column.into();
        self
    }

    pub fn with_test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Validate the settings once, before any data is touched.
    pub fn check(&self) -> Result<(), StartupError> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(StartupError::Settings(format!(
                "test ratio {} outside (0, 1)",
                self.test_ratio
            )));
        }
        if self.target_column.is_empty() {
            return Err(StartupError::Settings("target column is empty".to_string()));
        }
        Ok(())
    }
}
