//! `points-eval` wraps a single linear-regression training run in an HTTP
//! service.
//!
//! At startup the service loads a static JSON dataset of player records,
//! splits off the `points` column as the regression target, partitions the
//! rows into train/test subsets with a fixed seed, and fits an ordinary
//! least squares model once. The fitted model and the held-out partition
//! then live as immutable state for the process lifetime.
//!
//! A single route, `GET /evaluate_model`, reruns prediction over the test
//! partition, reports MSE, MAE and R², and dumps the raw predictions to a
//! JSON file as a side effect.
//!
//! ```no_run
//! use points_eval::{bootstrap, Settings};
//!
//! let settings = Settings::default();
//! let evaluator = bootstrap(&settings)?;
//! let evaluation = evaluator.evaluate()?;
//! println!("mse {} mae {} r2 {}", evaluation.mse, evaluation.mae, evaluation.r2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod linear;
pub mod metrics;
pub mod server;

pub use config::Settings;
pub use dataset::{Dataset, Table};
pub use eval::{bootstrap, Evaluation, Evaluator};
pub use linear::{FittedLinearRegression, LinearRegression};
pub use metrics::Regression;
