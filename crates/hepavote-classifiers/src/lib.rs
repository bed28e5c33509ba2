//! hepavote-classifiers: liver disease prediction from ten clinical
//! measurements using a majority-vote ensemble of fitted classifiers.
//!
//! This crate provides inference-only wrappers for fitted k-NN, random
//! forest and SVM pipelines, the loader that selects full (three members)
//! or degraded (single k-NN) mode at startup, the voting decision engine,
//! and batch scoring. Training is done offline; models arrive as JSON
//! artifacts.
pub mod config;
pub mod ensemble;
pub mod error;
pub mod features;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod record;

pub use config::{ArtifactConfig, ModelKind};
pub use ensemble::{BatchDecision, ClassifierVote, EnsembleDecision, EnsembleMode, EnsembleScorer};
pub use error::{LoadError, ScoringError};
pub use features::{read_feature_csv, FeatureVector, FEATURE_NAMES, N_FEATURES};
pub use models::Label;
pub use record::PredictionRecord;
