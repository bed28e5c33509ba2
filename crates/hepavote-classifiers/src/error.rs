use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal errors raised while loading fitted model artifacts.
#[derive(Debug)]
pub enum LoadError {
    /// Neither the ensemble bundle nor the fallback model exists.
    NoArtifact { bundle: PathBuf, fallback: PathBuf },
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    /// The artifact parsed but its shapes are inconsistent.
    InvalidModel { model: &'static str, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::NoArtifact { bundle, fallback } => write!(
                f,
                "No usable model artifact: neither {} nor {} exists",
                bundle.display(),
                fallback.display()
            ),
            LoadError::Io { path, source } => {
                write!(f, "Failed to read model artifact {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "Failed to parse model artifact {}: {}", path.display(), source)
            }
            LoadError::InvalidModel { model, reason } => {
                write!(f, "Invalid {} model: {}", model, reason)
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Request-scoped scoring failures. These never affect the loaded models.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    MalformedInput(String),
    DimensionMismatch {
        model: String,
        expected: usize,
        found: usize,
    },
    Classifier { model: String, message: String },
    /// A batch record failed; the whole batch is discarded.
    Batch {
        index: usize,
        source: Box<ScoringError>,
    },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScoringError::MalformedInput(msg) => write!(f, "Malformed feature vector: {}", msg),
            ScoringError::DimensionMismatch {
                model,
                expected,
                found,
            } => write!(
                f,
                "{} expects {} features but received {}",
                model, expected, found
            ),
            ScoringError::Classifier { model, message } => {
                write!(f, "{} failed to score input: {}", model, message)
            }
            ScoringError::Batch { index, source } => {
                write!(f, "Batch record {} failed: {}", index, source)
            }
        }
    }
}

impl Error for ScoringError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScoringError::Batch { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
