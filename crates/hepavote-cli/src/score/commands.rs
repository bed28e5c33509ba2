//! Subcommand bodies, kept out of `main` so they can be driven from tests.
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use hepavote_classifiers::ensemble::EnsembleMetrics;
use hepavote_classifiers::{
    read_feature_csv, ArtifactConfig, BatchDecision, EnsembleDecision, EnsembleMode,
    EnsembleScorer, FeatureVector, PredictionRecord, FEATURE_NAMES, N_FEATURES,
};

use crate::util::validate_tsv_or_csv_file;

/// `hepavote features`: numbered feature names, one per line.
pub fn feature_listing() -> String {
    let mut out = format!("{} features (in model column order):\n", N_FEATURES);
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        out.push_str(&format!("{:>3}  {}\n", i, name));
    }
    out
}

#[derive(Debug, Serialize)]
pub struct InfoSummary {
    pub mode: EnsembleMode,
    pub bundle_path: PathBuf,
    pub fallback_path: PathBuf,
    pub legacy_batch_inversion: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<EnsembleMetrics>,
}

impl InfoSummary {
    pub fn new(config: &ArtifactConfig, scorer: &EnsembleScorer) -> Self {
        InfoSummary {
            mode: scorer.mode(),
            bundle_path: config.bundle_path.clone(),
            fallback_path: config.fallback_path.clone(),
            legacy_batch_inversion: config.legacy_batch_inversion,
            metrics: scorer.metrics().cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictOutput {
    pub decision: EnsembleDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<PredictionRecord>,
}

/// `hepavote predict`: score one vector and, for a named user, attach the
/// history record the storage layer would persist.
pub fn predict(
    scorer: &EnsembleScorer,
    features: &FeatureVector,
    user: Option<&str>,
) -> Result<PredictOutput> {
    let decision = scorer.score(features)?;
    log::info!(
        "[hepavote] {} ({:.2}% confidence, {} mode)",
        decision.status,
        decision.confidence,
        decision.mode.as_str()
    );
    let record = user.map(|name| PredictionRecord::new(name, features, &decision));
    Ok(PredictOutput { decision, record })
}

/// `hepavote batch`: read the table and score every row.
pub fn batch(scorer: &EnsembleScorer, input: &Path) -> Result<Vec<BatchDecision>> {
    validate_tsv_or_csv_file(input)?;
    let features = read_feature_csv(input)?;
    log::info!("[hepavote] Scoring {} rows from {:?}", features.len(), input);
    Ok(scorer.score_batch(&features)?)
}
