use crate::config::ModelKind;
use crate::ensemble::vote::{
    majority_vote, single_classifier_decision, ClassifierVote, EnsembleDecision, EnsembleMode,
};
use crate::error::ScoringError;
use crate::features::FeatureVector;
use crate::models::ClassifierModel;

/// How a loaded model set turns one feature vector into a decision.
///
/// Chosen once when the artifacts are loaded; scoring code never branches
/// on the mode itself.
pub trait ScoringStrategy: Send + Sync {
    fn mode(&self) -> EnsembleMode;

    fn decide(&self, x: &FeatureVector) -> Result<EnsembleDecision, ScoringError>;
}

/// Three members combined by majority vote.
pub struct MajorityVoteStrategy {
    knn: Box<dyn ClassifierModel>,
    random_forest: Box<dyn ClassifierModel>,
    svm: Box<dyn ClassifierModel>,
}

impl MajorityVoteStrategy {
    pub fn new(
        knn: Box<dyn ClassifierModel>,
        random_forest: Box<dyn ClassifierModel>,
        svm: Box<dyn ClassifierModel>,
    ) -> Self {
        MajorityVoteStrategy {
            knn,
            random_forest,
            svm,
        }
    }
}

impl ScoringStrategy for MajorityVoteStrategy {
    fn mode(&self) -> EnsembleMode {
        EnsembleMode::Full
    }

    fn decide(&self, x: &FeatureVector) -> Result<EnsembleDecision, ScoringError> {
        let row = x.to_array();

        let knn = ClassifierVote::new(ModelKind::Knn, self.knn.predict(&row)?);
        let random_forest =
            ClassifierVote::new(ModelKind::RandomForest, self.random_forest.predict(&row)?);
        // The SVM's calibrated probability is reported for transparency only.
        let svm = ClassifierVote::new(ModelKind::Svm, self.svm.predict(&row)?)
            .with_probability(self.svm.predict_proba(&row)?.map(|p| p[1]));

        Ok(majority_vote([knn, random_forest, svm]))
    }
}

/// A single fallback member scoring on its own.
pub struct SingleClassifierStrategy {
    model: Box<dyn ClassifierModel>,
}

impl SingleClassifierStrategy {
    pub fn new(model: Box<dyn ClassifierModel>) -> Self {
        SingleClassifierStrategy { model }
    }
}

impl ScoringStrategy for SingleClassifierStrategy {
    fn mode(&self) -> EnsembleMode {
        EnsembleMode::Degraded
    }

    fn decide(&self, x: &FeatureVector) -> Result<EnsembleDecision, ScoringError> {
        let row = x.to_array();
        let label = self.model.predict(&row)?;
        let proba = self.model.predict_proba(&row)?;
        Ok(single_classifier_decision(self.model.kind(), label, proba))
    }
}
