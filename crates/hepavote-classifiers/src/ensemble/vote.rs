//! Decision rules that turn member outputs into one ensemble decision.
//!
//! Full mode and degraded mode report different confidence metrics under the
//! same field: agreement ratio across members versus the sole member's own
//! class probability. Downstream consumers rely on both ranges, so the two
//! formulas are kept separate.

use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::models::Label;

/// Which set of members is serving predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsembleMode {
    /// Three members combined by majority vote.
    Full,
    /// A single fallback member.
    Degraded,
}

impl EnsembleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EnsembleMode::Full => "full",
            EnsembleMode::Degraded => "degraded",
        }
    }
}

/// One member's output for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierVote {
    pub classifier: ModelKind,
    pub label: Label,
    /// Probability of the positive class, when the member exposes it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub probability: Option<f64>,
}

impl ClassifierVote {
    pub fn new(classifier: ModelKind, label: Label) -> Self {
        ClassifierVote {
            classifier,
            label,
            probability: None,
        }
    }

    pub fn with_probability(mut self, probability: Option<f64>) -> Self {
        self.probability = probability;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleDecision {
    pub prediction: Label,
    pub status: String,
    /// Percentage in `[0, 100]`.
    pub confidence: f64,
    /// Number of members agreeing with `prediction` (full mode only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub agreement: Option<usize>,
    pub votes: Vec<ClassifierVote>,
    pub mode: EnsembleMode,
}

/// Strict majority over the three member votes.
///
/// With three binary voters a tie cannot occur: the label is `Disease` when at
/// least two members vote for it, and confidence is the share of members
/// agreeing with the result (`200/3` or `100` percent).
pub fn majority_vote(votes: [ClassifierVote; 3]) -> EnsembleDecision {
    let positives = votes.iter().filter(|v| v.label == Label::Disease).count();
    let prediction = if positives * 2 > votes.len() {
        Label::Disease
    } else {
        Label::NoDisease
    };
    let agreement = votes.iter().filter(|v| v.label == prediction).count();
    let confidence = (agreement as f64 / votes.len() as f64) * 100.0;

    log::debug!(
        "majority vote: {}/{} positive -> {} ({}/{} agree)",
        positives,
        votes.len(),
        prediction,
        agreement,
        votes.len()
    );

    EnsembleDecision {
        prediction,
        status: prediction.status().to_string(),
        confidence,
        agreement: Some(agreement),
        votes: votes.to_vec(),
        mode: EnsembleMode::Full,
    }
}

/// Decision from a single member: its own label, with confidence taken from
/// the larger class probability, or `0.0` when it exposes none.
pub fn single_classifier_decision(
    classifier: ModelKind,
    label: Label,
    proba: Option<[f64; 2]>,
) -> EnsembleDecision {
    let confidence = proba.map_or(0.0, |p| p[0].max(p[1]) * 100.0);
    let vote = ClassifierVote::new(classifier, label).with_probability(proba.map(|p| p[1]));

    EnsembleDecision {
        prediction: label,
        status: label.status().to_string(),
        confidence,
        agreement: None,
        votes: vec![vote],
        mode: EnsembleMode::Degraded,
    }
}
