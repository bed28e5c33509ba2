//! Shared fixtures: injectable fake members and a small fitted bundle.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hepavote_classifiers::ensemble::{EnsembleBundle, EnsembleMetrics};
use hepavote_classifiers::error::ScoringError;
use hepavote_classifiers::math::Array2;
use hepavote_classifiers::models::{
    ClassifierModel, DecisionTree, Kernel, KnnClassifier, PlattScaling, RandomForestClassifier,
    SvmClassifier, TreeNode,
};
use hepavote_classifiers::preprocessing::Scaler;
use hepavote_classifiers::{FeatureVector, Label, ModelKind, N_FEATURES};

/// Always returns the same label; counts how often it is asked.
pub struct FixedClassifier {
    pub kind: ModelKind,
    pub label: Label,
    pub proba: Option<[f64; 2]>,
    pub calls: Arc<AtomicUsize>,
}

impl FixedClassifier {
    pub fn boxed(kind: ModelKind, label: Label) -> Box<dyn ClassifierModel> {
        Box::new(FixedClassifier {
            kind,
            label,
            proba: None,
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }
}

impl ClassifierModel for FixedClassifier {
    fn predict(&self, _x: &[f64]) -> Result<Label, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }

    fn predict_proba(&self, _x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.proba)
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }
}

/// Fails whenever the age field equals `poison_age`, otherwise votes disease.
pub struct PoisonedClassifier {
    pub kind: ModelKind,
    pub poison_age: f64,
}

impl ClassifierModel for PoisonedClassifier {
    fn predict(&self, x: &[f64]) -> Result<Label, ScoringError> {
        if x[0] == self.poison_age {
            return Err(ScoringError::Classifier {
                model: self.name().to_string(),
                message: "poisoned input".to_string(),
            });
        }
        Ok(Label::Disease)
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError> {
        self.predict(x).map(|_| Some([0.1, 0.9]))
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }
}

/// Route library logs through the test harness; set `RUST_LOG` to see them.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Always fails; rows with age below `slow_below` are held back first.
pub struct SlowFailingClassifier {
    pub slow_below: f64,
}

impl ClassifierModel for SlowFailingClassifier {
    fn predict(&self, x: &[f64]) -> Result<Label, ScoringError> {
        if x[0] < self.slow_below {
            std::thread::sleep(std::time::Duration::from_millis(30));
        }
        Err(ScoringError::Classifier {
            model: self.name().to_string(),
            message: format!("cannot score age {}", x[0]),
        })
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError> {
        self.predict(x).map(|_| None)
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Knn
    }
}

pub fn label(v: u8) -> Label {
    if v == 1 {
        Label::Disease
    } else {
        Label::NoDisease
    }
}

/// A realistic-looking patient row with the given total bilirubin.
pub fn patient(age: f64, total_bilirubin: f64) -> FeatureVector {
    FeatureVector::from_slice(&[
        age,
        1.0,
        total_bilirubin,
        total_bilirubin * 0.3,
        190.0,
        25.0,
        30.0,
        6.8,
        3.3,
        0.9,
    ])
    .unwrap()
}

/// k-NN over `n_features` columns: low bilirubin negative, high positive.
pub fn toy_knn(n_features: usize) -> KnnClassifier {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (bili, l) in [(0.5, 0), (0.7, 0), (0.9, 0), (4.0, 1), (6.0, 1), (8.0, 1)] {
        let mut row = vec![0.0; n_features];
        row[2.min(n_features - 1)] = bili;
        rows.push(row);
        labels.push(label(l));
    }
    KnnClassifier::new(
        Scaler::identity(n_features),
        3,
        Array2::from_rows(rows).unwrap(),
        labels,
    )
    .unwrap()
}

/// Ignores the other columns by giving them an enormous scale.
fn bilirubin_scaler() -> Scaler {
    let mut scale = vec![1e9; N_FEATURES];
    scale[2] = 1.0;
    Scaler {
        center: vec![0.0; N_FEATURES],
        scale,
    }
}

pub fn toy_knn_ignoring_other_columns() -> KnnClassifier {
    let mut knn = toy_knn(N_FEATURES);
    knn.scaler = bilirubin_scaler();
    knn
}

pub fn toy_forest() -> RandomForestClassifier {
    let stump = |threshold: f64| DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature: 2,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { counts: [9.0, 1.0] },
            TreeNode::Leaf { counts: [2.0, 8.0] },
        ],
    };
    RandomForestClassifier::new(
        Scaler::identity(N_FEATURES),
        vec![stump(1.5), stump(2.0), stump(2.5)],
    )
    .unwrap()
}

/// Linear SVM voting disease when total bilirubin exceeds 2.
pub fn toy_svm() -> SvmClassifier {
    let mut sv = vec![0.0; N_FEATURES];
    sv[2] = 1.0;
    SvmClassifier::new(
        Scaler::identity(N_FEATURES),
        Kernel::Linear,
        Array2::from_rows(vec![sv]).unwrap(),
        vec![1.0],
        -2.0,
        Some(PlattScaling { a: -1.5, b: 0.0 }),
    )
    .unwrap()
}

pub fn toy_bundle() -> EnsembleBundle {
    EnsembleBundle {
        knn: toy_knn_ignoring_other_columns(),
        random_forest: toy_forest(),
        svm: toy_svm(),
        metrics: EnsembleMetrics {
            knn_accuracy: Some(0.7759),
            rf_accuracy: Some(0.7155),
            svm_accuracy: Some(0.7155),
            ensemble_accuracy: 0.7414,
            ensemble_precision: Some(0.78),
            ensemble_recall: Some(0.88),
            ensemble_f1: Some(0.83),
        },
    }
}
