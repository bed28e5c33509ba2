use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::error::{LoadError, ScoringError};
use crate::math::{dot, squared_distance, Array2};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::{check_dimensions, Label};
use crate::preprocessing::Scaler;

/// Kernel used by the fitted SVM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kernel", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    #[serde(alias = "gauss")]
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: u32 },
}

impl Kernel {
    pub fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => (-gamma * squared_distance(a, b)).exp(),
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(a, b) + coef0).powi(*degree as i32),
        }
    }
}

/// Platt sigmoid mapping decision values to `P(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattScaling {
    pub a: f64,
    pub b: f64,
}

impl PlattScaling {
    pub fn probability(&self, decision: f64) -> f64 {
        1.0 / (1.0 + (self.a * decision + self.b).exp())
    }
}

/// Fitted binary support-vector classifier.
///
/// The decision value is `sum_i dual_coef[i] * K(sv_i, x) + intercept`;
/// positive values predict disease. Probabilities are only available when
/// the model was exported with Platt calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmClassifier {
    pub scaler: Scaler,
    #[serde(flatten)]
    pub kernel: Kernel,
    pub support_vectors: Array2<f64>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub probability: Option<PlattScaling>,
}

impl SvmClassifier {
    pub fn new(
        scaler: Scaler,
        kernel: Kernel,
        support_vectors: Array2<f64>,
        dual_coef: Vec<f64>,
        intercept: f64,
        probability: Option<PlattScaling>,
    ) -> Result<Self, LoadError> {
        let model = SvmClassifier {
            scaler,
            kernel,
            support_vectors,
            dual_coef,
            intercept,
            probability,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        let invalid = |reason: String| LoadError::InvalidModel {
            model: "svm",
            reason,
        };
        self.scaler.validate("svm")?;
        if self.support_vectors.nrows() == 0 {
            return Err(invalid("model has no support vectors".to_string()));
        }
        if self.support_vectors.nrows() != self.dual_coef.len() {
            return Err(invalid(format!(
                "{} support vectors but {} dual coefficients",
                self.support_vectors.nrows(),
                self.dual_coef.len()
            )));
        }
        if self.support_vectors.ncols() != self.scaler.n_features() {
            return Err(invalid(format!(
                "support vectors have {} columns but the scaler has {}",
                self.support_vectors.ncols(),
                self.scaler.n_features()
            )));
        }
        if !self.intercept.is_finite() {
            return Err(invalid("intercept must be finite".to_string()));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    pub fn decision_function(&self, x: &[f64]) -> Result<f64, ScoringError> {
        check_dimensions(self.name(), self.n_features(), x)?;
        let scaled = self.scaler.transform(x);
        let decision = self
            .support_vectors
            .rows()
            .zip(self.dual_coef.iter())
            .map(|(sv, coef)| coef * self.kernel.eval(sv, &scaled))
            .sum::<f64>()
            + self.intercept;

        if !decision.is_finite() {
            return Err(ScoringError::Classifier {
                model: self.name().to_string(),
                message: "decision value is not finite".to_string(),
            });
        }
        Ok(decision)
    }
}

impl ClassifierModel for SvmClassifier {
    fn predict(&self, x: &[f64]) -> Result<Label, ScoringError> {
        let decision = self.decision_function(x)?;
        Ok(if decision > 0.0 {
            Label::Disease
        } else {
            Label::NoDisease
        })
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError> {
        let Some(platt) = self.probability else {
            return Ok(None);
        };
        let p = platt.probability(self.decision_function(x)?);
        Ok(Some([1.0 - p, p]))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Svm
    }
}
