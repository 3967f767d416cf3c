//! Dataset loading, column splitting and the train/test partition.
//!
//! A [`Table`] is the dataset exactly as it sits in the JSON file: ordered
//! records, untyped values, no schema beyond the key order of the first
//! record. A [`Dataset`] is the numeric form consumed by the trainer and the
//! evaluation pipeline: a record matrix, an aligned target vector and the
//! feature names that produced them.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::{Map, Value};

use crate::error::{FitError, LoadError, SchemaError};

/// An immutable, ordered table of JSON records.
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    /// Read an array-of-records JSON file.
    ///
    /// No schema is enforced here; the key order of the first record fixes
    /// the column order for the whole table.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
        let file = File::open(path.as_ref())?;
        let rows: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file))?;

        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        Ok(Table { columns, rows })
    }

    pub fn nsamples(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Partition the columns into features and the named target.
    ///
    /// All columns other than `target` become features, in their original
    /// order.
    pub fn split_target(&self, target: &str) -> Result<ColumnSplit<'_>, SchemaError> {
        if !self.columns.iter().any(|c| c == target) {
            return Err(SchemaError::MissingTarget(target.to_string()));
        }

        let feature_names = self
            .columns
            .iter()
            .filter(|c| *c != target)
            .cloned()
            .collect();

        Ok(ColumnSplit {
            feature_names,
            target: target.to_string(),
            rows: &self.rows,
        })
    }
}

/// A column-wise split of a [`Table`]: feature columns plus one target
/// column, still untyped.
pub struct ColumnSplit<'a> {
    feature_names: Vec<String>,
    target: String,
    rows: &'a [Map<String, Value>],
}

impl ColumnSplit<'_> {
    /// Coerce every value to `f64` and assemble the numeric dataset.
    ///
    /// JSON numbers pass through, booleans map to 0/1 and numeric strings
    /// are parsed. Anything else, or a record missing a column, fails the
    /// fit before it starts.
    pub fn into_dataset(self) -> Result<Dataset, FitError> {
        let n = self.rows.len();
        let d = self.feature_names.len();

        let mut records = Array2::zeros((n, d));
        let mut targets = Array1::zeros(n);

        for (i, row) in self.rows.iter().enumerate() {
            for (j, name) in self.feature_names.iter().enumerate() {
                records[[i, j]] = coerce(row.get(name.as_str()), name, i)?;
            }
            targets[i] = coerce(row.get(self.target.as_str()), &self.target, i)?;
        }

        Ok(Dataset {
            records,
            targets,
            feature_names: self.feature_names,
        })
    }
}

fn coerce(value: Option<&Value>, column: &str, row: usize) -> Result<f64, FitError> {
    let value = value.ok_or_else(|| FitError::MissingValue {
        column: column.to_string(),
        row,
    })?;

    let non_numeric = || FitError::NonNumeric {
        column: column.to_string(),
        row,
    };

    match value {
        Value::Number(n) => n.as_f64().ok_or_else(non_numeric),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| non_numeric()),
        _ => Err(non_numeric()),
    }
}

/// A numeric dataset: one record per row, one feature per column, targets
/// aligned by row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Array2<f64>,
    targets: Array1<f64>,
    feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(records: Array2<f64>, targets: Array1<f64>, feature_names: Vec<String>) -> Dataset {
        Dataset {
            records,
            targets,
            feature_names,
        }
    }

    pub fn records(&self) -> &Array2<f64> {
        &self.records
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    /// Return a copy of the dataset with its rows shuffled.
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        Dataset {
            records: self.records.select(Axis(0), &indices),
            targets: self.targets.select(Axis(0), &indices),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Split row-wise into `(head, tail)` where the tail receives
    /// `round(nsamples × ratio)` rows.
    pub fn split_with_ratio(self, ratio: f64) -> (Dataset, Dataset) {
        let n_tail = (self.nsamples() as f64 * ratio).round() as usize;
        let split_at = self.nsamples() - n_tail;

        let (head_records, tail_records) = self.records.view().split_at(Axis(0), split_at);
        let (head_targets, tail_targets) = self.targets.view().split_at(Axis(0), split_at);

        let head = Dataset {
            records: head_records.to_owned(),
            targets: head_targets.to_owned(),
            feature_names: self.feature_names.clone(),
        };
        let tail = Dataset {
            records: tail_records.to_owned(),
            targets: tail_targets.to_owned(),
            feature_names: self.feature_names,
        };

        (head, tail)
    }

    /// The reproducible train/test partition.
    ///
    /// Rows are shuffled by a small RNG seeded with `seed`, then split so the
    /// test partition receives `round(nsamples × test_ratio)` rows. The
    /// assignment depends only on the row count and the seed, never on the
    /// data values, so a rerun over an unchanged dataset yields the same
    /// partition.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> (Dataset, Dataset) {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.shuffle(&mut rng).split_with_ratio(test_ratio)
    }
}
