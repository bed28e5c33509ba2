//! Small dense matrix type for fitted model parameters.
//!
//! The models only need row access and a
//! row-list JSON representation.
pub mod matrix;

pub use matrix::{Array2, ShapeError};

/// Squared Euclidean distance between two equally sized slices.
#[inline]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
