use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Binary diagnosis label. Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    NoDisease,
    Disease,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::NoDisease => 0,
            Label::Disease => 1,
        }
    }

    /// Fixed human readable status for the label.
    pub fn status(self) -> &'static str {
        match self {
            Label::Disease => "Liver Disease Detected",
            Label::NoDisease => "No Liver Disease",
        }
    }

    /// The opposite label.
    pub fn inverted(self) -> Label {
        match self {
            Label::Disease => Label::NoDisease,
            Label::NoDisease => Label::Disease,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::NoDisease),
            1 => Ok(Label::Disease),
            other => Err(format!("Label must be 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Fail the request when the row width differs from the fitted width.
pub fn check_dimensions(model: &str, expected: usize, x: &[f64]) -> Result<(), ScoringError> {
    if x.len() != expected {
        return Err(ScoringError::DimensionMismatch {
            model: model.to_string(),
            expected,
            found: x.len(),
        });
    }
    Ok(())
}

/// Label with the larger probability; an exact tie resolves to class 0.
pub fn argmax_label(proba: [f64; 2]) -> Label {
    if proba[1] > proba[0] {
        Label::Disease
    } else {
        Label::NoDisease
    }
}
