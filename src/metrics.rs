//! Regression metrics over prediction vectors.
//!
//! Metrics compare a prediction vector against the ground truth, so they
//! read as `prediction.r2(truth)`.

use ndarray::{ArrayBase, ArrayView1, Data, Ix1};
use std::ops::Sub;

/// Regression metrics trait
pub trait Regression {
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: ArrayView1<f64>) -> f64;
    /// Mean absolute error between two continuous variables
    fn mean_absolute_error(&self, compare_to: ArrayView1<f64>) -> f64;
    /// R squared coefficient, the proportion of the variance in the
    /// dependent variable that is predictable from the independent variable.
    fn r2(&self, compare_to: ArrayView1<f64>) -> f64;
}

impl<D: Data<Elem = f64>> Regression for ArrayBase<D, Ix1> {
    fn mean_squared_error(&self, compare_to: ArrayView1<f64>) -> f64 {
        self.sub(&compare_to).mapv(|x| x * x).mean().unwrap()
    }

    fn mean_absolute_error(&self, compare_to: ArrayView1<f64>) -> f64 {
        self.sub(&compare_to).mapv(|x| x.abs()).mean().unwrap()
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // the denominator is stabilised with a small epsilon, so a constant
    // target yields a finite value instead of NaN
    fn r2(&self, compare_to: ArrayView1<f64>) -> f64 {
        let mean = compare_to.mean().unwrap();

        1.0 - self.sub(&compare_to).mapv(|x| x * x).sum()
            / (compare_to.mapv(|x| (x - mean) * (x - mean)).sum() + 1e-10)
    }
}
