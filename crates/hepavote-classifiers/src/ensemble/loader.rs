//! Loading fitted model artifacts at startup.
//!
//! The primary artifact is a bundle with all three ensemble members and their
//! historical metrics. When it is absent a single k-NN model is loaded
//! instead. Anything else (no artifact at all, unreadable or inconsistent
//! files) is fatal: serving with a broken model set is never attempted.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ensemble::strategy::{MajorityVoteStrategy, ScoringStrategy, SingleClassifierStrategy};
use crate::error::LoadError;
use crate::features::N_FEATURES;
use crate::models::{build_model, KnnClassifier, ModelArtifact, RandomForestClassifier, SvmClassifier};

/// Accuracy figures measured when the bundle was fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMetrics {
    #[serde(default)]
    pub knn_accuracy: Option<f64>,
    #[serde(default)]
    pub rf_accuracy: Option<f64>,
    #[serde(default)]
    pub svm_accuracy: Option<f64>,
    pub ensemble_accuracy: f64,
    #[serde(default)]
    pub ensemble_precision: Option<f64>,
    #[serde(default)]
    pub ensemble_recall: Option<f64>,
    #[serde(default)]
    pub ensemble_f1: Option<f64>,
}

/// On-disk layout of the three-member bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleBundle {
    pub knn: KnnClassifier,
    pub random_forest: RandomForestClassifier,
    pub svm: SvmClassifier,
    pub metrics: EnsembleMetrics,
}

/// Result of loading: the strategy to serve with, plus bundle metrics in
/// full mode.
pub struct LoadedModels {
    pub strategy: Box<dyn ScoringStrategy>,
    pub metrics: Option<EnsembleMetrics>,
}

/// Load the ensemble bundle, falling back to a single k-NN model.
pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
    bundle_path: P,
    fallback_path: Q,
) -> Result<LoadedModels, LoadError> {
    let bundle_path = bundle_path.as_ref();
    let fallback_path = fallback_path.as_ref();

    if let Some(bundle) = read_artifact::<EnsembleBundle>(bundle_path)? {
        log::info!(
            "Loaded voting ensemble from {} (historical accuracy {:.2}%)",
            bundle_path.display(),
            bundle.metrics.ensemble_accuracy * 100.0
        );
        warn_on_width("knn", bundle.knn.n_features());
        warn_on_width("random_forest", bundle.random_forest.n_features());
        warn_on_width("svm", bundle.svm.n_features());

        let strategy = MajorityVoteStrategy::new(
            build_model(ModelArtifact::Knn(bundle.knn))?,
            build_model(ModelArtifact::RandomForest(bundle.random_forest))?,
            build_model(ModelArtifact::Svm(bundle.svm))?,
        );
        return Ok(LoadedModels {
            strategy: Box::new(strategy),
            metrics: Some(bundle.metrics),
        });
    }

    log::warn!(
        "Ensemble bundle {} not found; falling back to a single k-NN model",
        bundle_path.display()
    );

    if let Some(knn) = read_artifact::<KnnClassifier>(fallback_path)? {
        warn_on_width("knn", knn.n_features());
        log::warn!(
            "Serving in degraded mode from {}: confidence is the k-NN class probability",
            fallback_path.display()
        );
        let model = build_model(ModelArtifact::Knn(knn))?;
        return Ok(LoadedModels {
            strategy: Box::new(SingleClassifierStrategy::new(model)),
            metrics: None,
        });
    }

    Err(LoadError::NoArtifact {
        bundle: bundle_path.to_path_buf(),
        fallback: fallback_path.to_path_buf(),
    })
}

/// Read and parse a JSON artifact. A missing file is `Ok(None)`; every other
/// failure is an error.
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// A width mismatch fails every request, but only at scoring time.
fn warn_on_width(model: &str, n_features: usize) {
    if n_features != N_FEATURES {
        log::warn!(
            "{} was fitted on {} features but requests carry {}; scoring will fail",
            model,
            n_features,
            N_FEATURES
        );
    }
}
