use crate::config::ModelKind;
use crate::error::ScoringError;
use crate::models::Label;

/// Inference contract shared by every fitted ensemble member.
///
/// Implementations hold immutable fitted state, so a single instance can be
/// scored from many threads at once. Inputs are raw (unscaled) feature rows
/// in fitted column order; each model applies its own scaler.
pub trait ClassifierModel: Send + Sync {
    /// Predict the binary class for one row.
    fn predict(&self, x: &[f64]) -> Result<Label, ScoringError>;

    /// Class probabilities `[P(0), P(1)]` when the model exposes them.
    fn predict_proba(&self, x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError>;

    fn kind(&self) -> ModelKind;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        self.kind().as_str()
    }
}
