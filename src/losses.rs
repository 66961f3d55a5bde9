//! Module containing the loss functions used to score a training epoch.
//!
//! Losses compare an expected output vector against the vector the network
//! actually produced and collapse the differences into a single scalar.
//! The set of strategies is closed and stable, so it is expressed as an enum
//! dispatching to the formula.
//!
//! # Available Loss Functions
//!
//! - **MSE (Mean Squared Error)**: `mean((actual - expected)^2)`
//! - **MAE (Mean Absolute Error)**: `mean(|actual - expected|)`

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type LossResult<T> = std::result::Result<T, LossError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LossError {
    #[error("expected and actual should be the same length: {expected} vs {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Loss strategy applied once per training epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loss {
    /// Mean of the squared elementwise differences.
    MeanSquaredError,
    /// Mean of the absolute elementwise differences.
    MeanAbsoluteError,
}

impl Loss {
    /// Computes the scalar loss between `expected` and `actual`.
    ///
    /// Rejects vectors of different lengths.
    pub fn calculate(&self, expected: &Array1<f32>, actual: &Array1<f32>) -> LossResult<f32> {
        if expected.len() != actual.len() {
            return Err(LossError::LengthMismatch {
                expected: expected.len(),
                actual: actual.len(),
            });
        }

        let sum: f32 = expected
            .iter()
            .zip(actual.iter())
            .map(|(&expected, &actual)| match self {
                Self::MeanSquaredError => (actual - expected) * (actual - expected),
                Self::MeanAbsoluteError => (actual - expected).abs(),
            })
            .sum();

        Ok(sum / expected.len() as f32)
    }
}
