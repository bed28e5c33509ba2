use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::error::{LoadError, ScoringError};
use crate::math::{squared_distance, Array2};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::{argmax_label, check_dimensions, Label};
use crate::preprocessing::Scaler;

/// Fitted k-nearest-neighbours classifier with uniform neighbour weights.
///
/// `points` are stored already scaled; incoming rows are scaled with
/// `scaler` before distances are computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnClassifier {
    pub scaler: Scaler,
    pub k: usize,
    pub points: Array2<f64>,
    pub labels: Vec<Label>,
}

impl KnnClassifier {
    pub fn new(
        scaler: Scaler,
        k: usize,
        points: Array2<f64>,
        labels: Vec<Label>,
    ) -> Result<Self, LoadError> {
        let model = KnnClassifier {
            scaler,
            k,
            points,
            labels,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        let invalid = |reason: String| LoadError::InvalidModel {
            model: "knn",
            reason,
        };
        self.scaler.validate("knn")?;
        if self.points.nrows() != self.labels.len() {
            return Err(invalid(format!(
                "{} training points but {} labels",
                self.points.nrows(),
                self.labels.len()
            )));
        }
        if self.k == 0 || self.k > self.points.nrows() {
            return Err(invalid(format!(
                "k must be in 1..={}, got {}",
                self.points.nrows(),
                self.k
            )));
        }
        if self.points.ncols() != self.scaler.n_features() {
            return Err(invalid(format!(
                "training points have {} columns but the scaler has {}",
                self.points.ncols(),
                self.scaler.n_features()
            )));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    /// Indices of the `k` nearest training points. Equal distances keep
    /// training order.
    fn neighbours(&self, x: &[f64]) -> Result<Vec<usize>, ScoringError> {
        check_dimensions(self.name(), self.n_features(), x)?;
        let scaled = self.scaler.transform(x);

        let mut distances: Vec<(f64, usize)> = self
            .points
            .rows()
            .enumerate()
            .map(|(i, row)| (squared_distance(row, &scaled), i))
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(distances.iter().take(self.k).map(|&(_, i)| i).collect())
    }
}

impl ClassifierModel for KnnClassifier {
    fn predict(&self, x: &[f64]) -> Result<Label, ScoringError> {
        let proba = self.predict_proba(x)?.unwrap_or([1.0, 0.0]);
        Ok(argmax_label(proba))
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError> {
        let neighbours = self.neighbours(x)?;
        let positives = neighbours
            .iter()
            .filter(|&&i| self.labels[i] == Label::Disease)
            .count();
        let p = positives as f64 / neighbours.len() as f64;
        log::trace!("knn: {}/{} neighbours positive", positives, neighbours.len());
        Ok(Some([1.0 - p, p]))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Knn
    }
}
