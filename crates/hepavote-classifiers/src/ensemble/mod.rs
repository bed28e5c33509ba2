//! Classifier ensemble adapter and voting decision engine.
pub mod loader;
pub mod scorer;
pub mod strategy;
pub mod vote;

pub use loader::{load, EnsembleBundle, EnsembleMetrics, LoadedModels};
pub use scorer::{BatchDecision, EnsembleScorer};
pub use strategy::{MajorityVoteStrategy, ScoringStrategy, SingleClassifierStrategy};
pub use vote::{
    majority_vote, single_classifier_decision, ClassifierVote, EnsembleDecision, EnsembleMode,
};
