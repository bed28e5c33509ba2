pub mod classifier_trait;
pub mod factory;
pub mod knn;
pub mod random_forest;
pub mod svm;
pub mod utils;

pub use classifier_trait::ClassifierModel;
pub use factory::{build_model, ModelArtifact};
pub use knn::KnnClassifier;
pub use random_forest::{DecisionTree, RandomForestClassifier, TreeNode};
pub use svm::{Kernel, PlattScaling, SvmClassifier};
pub use utils::Label;
