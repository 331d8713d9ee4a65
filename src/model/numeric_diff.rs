// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains a finite-difference gradient estimator.
use crate::exception::{check_dimension, OcpResult};
use serde::{Deserialize, Serialize};

/// Default step size of the finite differences.
pub static DEFAULT_EPSILON: f64 = 1e-6;

/// Finite-difference scheme.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericDiffMode {
    /// (f(x + h) - f(x)) / h, one evaluation per coordinate plus one at x.
    Forward,
    /// (f(x + h) - f(x - h)) / 2h, two evaluations per coordinate.
    Central,
}

impl Default for NumericDiffMode {
    fn default() -> Self {
        NumericDiffMode::Central
    }
}

/// Estimates the gradient of a scalar function over a vector domain.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericDiff {
    /// scheme used for the estimation
    pub mode: NumericDiffMode,
    /// absolute step applied to each coordinate
    pub epsilon: f64,
}

impl Default for NumericDiff {
    fn default() -> Self {
        NumericDiff {
            mode: NumericDiffMode::default(),
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl NumericDiff {
    /// Creates a new estimator.
    pub fn new(mode: NumericDiffMode, epsilon: f64) -> Self {
        NumericDiff { mode, epsilon }
    }

    /// Computes the gradient of `function` at `point`.
    ///
    /// # Arguments
    /// * `function` - Scalar function to differentiate. Errors are forwarded.
    /// * `point` - Point at which the gradient is estimated.
    /// * `gradient` - Output, has to be as long as `point`.
    /// # Errors
    /// * [`InconsistentDimension`](`crate::exception::OcpException::InconsistentDimension`)
    /// if `gradient` and `point` differ in length.
    /// * Any error returned by `function`.
    pub fn gradient<F>(&self, mut function: F, point: &[f64], gradient: &mut [f64]) -> OcpResult<()>
    where
        F: FnMut(&[f64]) -> OcpResult<f64>,
    {
        check_dimension("gradient", point.len(), gradient.len())?;
        let h = self.epsilon;
        let mut x = point.to_vec();
        match self.mode {
            NumericDiffMode::Forward => {
                let f0 = function(&x)?;
                for j in 0..x.len() {
                    x[j] = point[j] + h;
                    let f1 = function(&x)?;
                    x[j] = point[j];
                    gradient[j] = (f1 - f0) / h;
                }
            }
            NumericDiffMode::Central => {
                for j in 0..x.len() {
                    x[j] = point[j] + h;
                    let f1 = function(&x)?;
                    x[j] = point[j] - h;
                    let f2 = function(&x)?;
                    x[j] = point[j];
                    gradient[j] = (f1 - f2) / (2. * h);
                }
            }
        }
        Ok(())
    }
}
