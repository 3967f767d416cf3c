//! Ordinary least squares over the training partition.
#![allow(non_snake_case)]

use linfa_linalg::qr::LeastSquaresQrInto;
use ndarray::{concatenate, s, Array1, Array2, ArrayView2, Axis};

use crate::dataset::Dataset;
use crate::error::FitError;

/// An ordinary least squares linear regression model.
///
/// Fits a linear model minimizing the residual sum of squares between the
/// observed targets and the targets predicted by the linear approximation,
/// solving the overconstrained system
///
/// y = Ax + b
///
/// for the x and b that minimize ||y - Ax - b||_2.
pub struct LinearRegression {
    fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        LinearRegression::new()
    }
}

impl LinearRegression {
    /// Create a default linear regression model.
    /// By default, an intercept will be fitted.
    pub fn new() -> LinearRegression {
        LinearRegression {
            fit_intercept: true,
        }
    }

    /// Configure the linear regression model to fit an intercept.
    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.fit_intercept = intercept;
        self
    }

    /// Fit the model on a dataset's records and targets.
    ///
    /// Returns a [`FittedLinearRegression`] holding the learned weight per
    /// feature column plus the intercept, which can then predict target
    /// values for new records.
    pub fn fit(&self, dataset: &Dataset) -> Result<FittedLinearRegression, FitError> {
        let X = dataset.records();
        let y = dataset.targets();

        let (n_samples, _) = X.dim();
        if n_samples == 0 {
            return Err(FitError::NotEnoughSamples);
        }
        if y.dim() != n_samples {
            return Err(FitError::ShapeMismatch {
                records: n_samples,
                targets: y.dim(),
            });
        }

        if self.fit_intercept {
            let X = concatenate(Axis(1), &[X.view(), Array2::ones((X.nrows(), 1)).view()]).unwrap();
            let params = solve_least_squares(X, y.to_owned())?;
            let intercept = *params.last().unwrap();
            let params = params.slice(s![..params.len() - 1]).to_owned();
            Ok(FittedLinearRegression { intercept, params })
        } else {
            let (X, y) = (X.to_owned(), y.to_owned());

            Ok(FittedLinearRegression {
                intercept: 0.0,
                params: solve_least_squares(X, y)?,
            })
        }
    }
}

/// Find the b that minimizes the 2-norm of X b - y
/// by using the least squares solver from linfa-linalg
fn solve_least_squares(mut X: Array2<f64>, mut y: Array1<f64>) -> Result<Array1<f64>, FitError> {
    let (X, y) = (X.view_mut(), y.view_mut());

    let out = X
        .least_squares_into(y.insert_axis(Axis(1)))?
        .remove_axis(Axis(1));
    Ok(out)
}

/// A fitted linear regression model which can be used for making predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearRegression {
    intercept: f64,
    params: Array1<f64>,
}

impl FittedLinearRegression {
    /// Get the fitted parameters
    pub fn params(&self) -> &Array1<f64> {
        &self.params
    }

    /// Get the fitted intercept, 0. if no intercept was fitted
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predict the target for every row of `x`, in row order.
    ///
    /// `x` must have one column per fitted parameter.
    pub fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        x.dot(&self.params) + self.intercept
    }
}
