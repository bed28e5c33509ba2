//! Flattened prediction history entries handed to the storage layer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ensemble::EnsembleDecision;
use crate::features::FeatureVector;
use crate::models::Label;

/// One "predict and remember" result. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub user: String,
    pub medical_parameters: FeatureVector,
    /// `Male` or `Female`, as stored in the history table.
    pub gender: String,
    pub prediction: Label,
    pub status: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(user: &str, features: &FeatureVector, decision: &EnsembleDecision) -> Self {
        Self::with_timestamp(user, features, decision, Utc::now())
    }

    pub fn with_timestamp(
        user: &str,
        features: &FeatureVector,
        decision: &EnsembleDecision,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let gender = if features.is_male() { "Male" } else { "Female" };
        PredictionRecord {
            user: user.to_string(),
            medical_parameters: *features,
            gender: gender.to_string(),
            prediction: decision.prediction,
            status: decision.status.clone(),
            confidence: decision.confidence,
            timestamp,
        }
    }
}
