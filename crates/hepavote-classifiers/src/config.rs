use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Central configuration for locating fitted model artifacts.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Bundle holding the three fitted ensemble members.
    pub bundle_path: PathBuf,
    /// Single k-NN model used when the bundle is absent.
    pub fallback_path: PathBuf,
    /// Reproduce the inverted labels of the legacy batch endpoint.
    pub legacy_batch_inversion: bool,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from("voting_ensemble_model.json"),
            fallback_path: PathBuf::from("knn_best_model.json"),
            legacy_batch_inversion: false,
        }
    }
}

impl ArtifactConfig {
    pub fn new<P: Into<PathBuf>>(bundle_path: P, fallback_path: P) -> Self {
        Self {
            bundle_path: bundle_path.into(),
            fallback_path: fallback_path.into(),
            legacy_batch_inversion: false,
        }
    }
}

/// Identity of an ensemble member.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Knn,
    RandomForest,
    Svm,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Knn => "knn",
            ModelKind::RandomForest => "random_forest",
            ModelKind::Svm => "svm",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knn" => Ok(ModelKind::Knn),
            "random_forest" | "rf" => Ok(ModelKind::RandomForest),
            "svm" => Ok(ModelKind::Svm),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: knn, random_forest, svm",
                s
            )),
        }
    }
}
