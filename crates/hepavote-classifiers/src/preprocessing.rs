//! Feature scaling applied in front of every fitted estimator.
//!
//! The offline pipeline fits a robust scaler (median / interquartile range)
//! and exports its per-column parameters; at serving time only the
//! transform is needed.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Fitted robust scaler (per-column center and scale).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub center: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler {
    /// Scales at or below this magnitude are treated as 1.
    const MIN_SCALE: f64 = 1e-12;

    /// Identity transform over `n` columns.
    pub fn identity(n: usize) -> Self {
        Scaler {
            center: vec![0.0; n],
            scale: vec![1.0; n],
        }
    }

    pub fn n_features(&self) -> usize {
        self.center.len()
    }

    pub fn validate(&self, model: &'static str) -> Result<(), LoadError> {
        if self.center.len() != self.scale.len() {
            return Err(LoadError::InvalidModel {
                model,
                reason: format!(
                    "scaler center has {} entries but scale has {}",
                    self.center.len(),
                    self.scale.len()
                ),
            });
        }
        if self
            .center
            .iter()
            .chain(self.scale.iter())
            .any(|v| !v.is_finite())
        {
            return Err(LoadError::InvalidModel {
                model,
                reason: "scaler parameters must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Transform one row. Callers check the row width beforehand.
    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.center.iter().zip(self.scale.iter()))
            .map(|(&v, (&c, &s))| {
                let s = if s.abs() <= Self::MIN_SCALE { 1.0 } else { s };
                (v - c) / s
            })
            .collect()
    }
}
