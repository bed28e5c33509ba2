use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ArtifactConfig;
use crate::ensemble::loader::{self, EnsembleMetrics};
use crate::ensemble::strategy::ScoringStrategy;
use crate::ensemble::vote::{EnsembleDecision, EnsembleMode};
use crate::error::{LoadError, ScoringError};
use crate::features::FeatureVector;

/// One batch result, tagged with the position of its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDecision {
    pub index: usize,
    #[serde(flatten)]
    pub decision: EnsembleDecision,
}

/// Process-lifetime scoring entry point.
///
/// Built once at startup and shared by reference (or `Arc`) with every
/// request handler. The mode is fixed at construction.
pub struct EnsembleScorer {
    strategy: Box<dyn ScoringStrategy>,
    metrics: Option<EnsembleMetrics>,
    legacy_batch_inversion: bool,
}

impl EnsembleScorer {
    /// Load the configured artifacts. Failure here means nothing can be
    /// served and should halt startup.
    pub fn initialize(config: &ArtifactConfig) -> Result<Self, LoadError> {
        let loaded = loader::load(&config.bundle_path, &config.fallback_path)?;
        let scorer = EnsembleScorer {
            strategy: loaded.strategy,
            metrics: loaded.metrics,
            legacy_batch_inversion: false,
        };
        Ok(scorer.with_legacy_batch_inversion(config.legacy_batch_inversion))
    }

    /// Wrap an already built strategy, e.g. one holding injected models.
    pub fn from_strategy(strategy: Box<dyn ScoringStrategy>) -> Self {
        EnsembleScorer {
            strategy,
            metrics: None,
            legacy_batch_inversion: false,
        }
    }

    pub fn with_metrics(mut self, metrics: EnsembleMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Flip every batch label the way the legacy batch endpoint did.
    pub fn with_legacy_batch_inversion(mut self, enabled: bool) -> Self {
        if enabled {
            log::warn!("Legacy batch label inversion is enabled; batch labels will be flipped");
        }
        self.legacy_batch_inversion = enabled;
        self
    }

    pub fn mode(&self) -> EnsembleMode {
        self.strategy.mode()
    }

    /// Historical bundle metrics (full mode only).
    pub fn metrics(&self) -> Option<&EnsembleMetrics> {
        self.metrics.as_ref()
    }

    pub fn score(&self, x: &FeatureVector) -> Result<EnsembleDecision, ScoringError> {
        x.validate()?;
        self.strategy.decide(x)
    }

    /// Score every vector independently. Results keep input order; any
    /// failure aborts the batch with the lowest failing index and no partial
    /// results are returned.
    pub fn score_batch(&self, xs: &[FeatureVector]) -> Result<Vec<BatchDecision>, ScoringError> {
        let scored: Vec<Result<BatchDecision, ScoringError>> = xs
            .par_iter()
            .enumerate()
            .map(|(index, x)| {
                let decision = self.score(x).map_err(|e| ScoringError::Batch {
                    index,
                    source: Box::new(e),
                })?;
                Ok(BatchDecision {
                    index,
                    decision: self.apply_legacy_inversion(decision),
                })
            })
            .collect();
        // Fold in input order: the lowest failing index wins.
        let results = scored.into_iter().collect::<Result<Vec<_>, ScoringError>>();

        match &results {
            Ok(decisions) => log::info!("Scored batch of {} records", decisions.len()),
            Err(e) => log::error!("Batch of {} records aborted: {}", xs.len(), e),
        }
        results
    }

    /// The legacy endpoint inverted the label and reversed the class
    /// probabilities; the reversed maximum is unchanged so confidence stays.
    /// Member votes are left as cast, and `agreement` is cleared because it
    /// no longer counts members backing the reported label.
    fn apply_legacy_inversion(&self, mut decision: EnsembleDecision) -> EnsembleDecision {
        if self.legacy_batch_inversion {
            decision.prediction = decision.prediction.inverted();
            decision.status = decision.prediction.status().to_string();
            decision.agreement = None;
        }
        decision
    }
}
