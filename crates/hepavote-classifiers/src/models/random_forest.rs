use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::error::{LoadError, ScoringError};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::{argmax_label, check_dimensions, Label};
use crate::preprocessing::Scaler;

/// One node of a fitted binary decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Rows with `x[feature] <= threshold` continue at `left`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Training class counts (or weights) that reached this leaf.
    Leaf { counts: [f64; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point forward, which also rules out cycles.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} of {}",
                            idx, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    for &child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", idx, child));
                        }
                    }
                }
                TreeNode::Leaf { counts } => {
                    let total = counts[0] + counts[1];
                    if counts.iter().any(|c| *c < 0.0 || !c.is_finite()) || total <= 0.0 {
                        return Err(format!("leaf {} has invalid class counts", idx));
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf `x` falls into.
    pub fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { counts } => {
                    let total = counts[0] + counts[1];
                    return [counts[0] / total, counts[1] / total];
                }
            }
        }
    }
}

/// Fitted random forest: class probabilities are averaged over all trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    pub scaler: Scaler,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    pub fn new(scaler: Scaler, trees: Vec<DecisionTree>) -> Result<Self, LoadError> {
        let model = RandomForestClassifier { scaler, trees };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        self.scaler.validate("random_forest")?;
        if self.trees.is_empty() {
            return Err(LoadError::InvalidModel {
                model: "random_forest",
                reason: "forest has no trees".to_string(),
            });
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features())
                .map_err(|reason| LoadError::InvalidModel {
                    model: "random_forest",
                    reason: format!("tree {}: {}", i, reason),
                })?;
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }
}

impl ClassifierModel for RandomForestClassifier {
    fn predict(&self, x: &[f64]) -> Result<Label, ScoringError> {
        let proba = self.predict_proba(x)?.unwrap_or([1.0, 0.0]);
        Ok(argmax_label(proba))
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Option<[f64; 2]>, ScoringError> {
        check_dimensions(self.name(), self.n_features(), x)?;
        let scaled = self.scaler.transform(x);

        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let p = tree.predict_proba(&scaled);
            sum[0] += p[0];
            sum[1] += p[1];
        }
        let n = self.trees.len() as f64;
        Ok(Some([sum[0] / n, sum[1] / n]))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::RandomForest
    }
}
