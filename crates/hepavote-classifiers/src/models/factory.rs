use crate::error::LoadError;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::knn::KnnClassifier;
use crate::models::random_forest::RandomForestClassifier;
use crate::models::svm::SvmClassifier;

/// A fitted model as read from an artifact, before validation.
#[derive(Debug, Clone)]
pub enum ModelArtifact {
    Knn(KnnClassifier),
    RandomForest(RandomForestClassifier),
    Svm(SvmClassifier),
}

/// Validate a fitted model and box it behind the classifier contract.
pub fn build_model(artifact: ModelArtifact) -> Result<Box<dyn ClassifierModel>, LoadError> {
    match artifact {
        ModelArtifact::Knn(model) => {
            model.validate()?;
            Ok(Box::new(model))
        }
        ModelArtifact::RandomForest(model) => {
            model.validate()?;
            Ok(Box::new(model))
        }
        ModelArtifact::Svm(model) => {
            model.validate()?;
            Ok(Box::new(model))
        }
    }
}
