//! The ten clinical measurements consumed by every classifier.
//!
//! Field order matches the column order the models were fitted on and must
//! never change. `FeatureVector` is always fully populated with finite
//! values; there is no implicit defaulting of missing measurements.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

pub const N_FEATURES: usize = 10;

/// Feature names in fitted column order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Age",
    "Gender",
    "Total_Bilirubin",
    "Direct_Bilirubin",
    "Alkaline_Phosphotase",
    "Alamine_Aminotransferase",
    "Aspartate_Aminotransferase",
    "Total_Proteins",
    "Albumin",
    "Albumin_and_Globulin_Ratio",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureVector {
    /// Age in years.
    #[serde(rename = "Age")]
    pub age: f64,
    /// 1 for male, 0 for female.
    #[serde(rename = "Gender")]
    pub gender: f64,
    #[serde(rename = "Total_Bilirubin")]
    pub total_bilirubin: f64,
    #[serde(rename = "Direct_Bilirubin")]
    pub direct_bilirubin: f64,
    #[serde(rename = "Alkaline_Phosphotase")]
    pub alkaline_phosphotase: f64,
    #[serde(rename = "Alamine_Aminotransferase")]
    pub alamine_aminotransferase: f64,
    #[serde(rename = "Aspartate_Aminotransferase")]
    pub aspartate_aminotransferase: f64,
    #[serde(rename = "Total_Proteins")]
    pub total_proteins: f64,
    #[serde(rename = "Albumin")]
    pub albumin: f64,
    #[serde(rename = "Albumin_and_Globulin_Ratio")]
    pub albumin_globulin_ratio: f64,
}

impl FeatureVector {
    /// Build a vector from values in fitted column order.
    pub fn from_slice(values: &[f64]) -> Result<Self, ScoringError> {
        if values.len() != N_FEATURES {
            return Err(ScoringError::MalformedInput(format!(
                "expected {} values, got {}",
                N_FEATURES,
                values.len()
            )));
        }
        let vector = FeatureVector {
            age: values[0],
            gender: values[1],
            total_bilirubin: values[2],
            direct_bilirubin: values[3],
            alkaline_phosphotase: values[4],
            alamine_aminotransferase: values[5],
            aspartate_aminotransferase: values[6],
            total_proteins: values[7],
            albumin: values[8],
            albumin_globulin_ratio: values[9],
        };
        vector.validate()?;
        Ok(vector)
    }

    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.age,
            self.gender,
            self.total_bilirubin,
            self.direct_bilirubin,
            self.alkaline_phosphotase,
            self.alamine_aminotransferase,
            self.aspartate_aminotransferase,
            self.total_proteins,
            self.albumin,
            self.albumin_globulin_ratio,
        ]
    }

    /// Reject NaN and infinite measurements.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.to_array()) {
            if !value.is_finite() {
                return Err(ScoringError::MalformedInput(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn is_male(&self) -> bool {
        self.gender == 1.0
    }
}

/// Parse `--values`-style input: ten comma-separated numbers.
pub fn parse_feature_list(input: &str) -> Result<FeatureVector, ScoringError> {
    let values = input
        .split(',')
        .map(|v| {
            v.trim().parse::<f64>().map_err(|_| {
                ScoringError::MalformedInput(format!("'{}' is not a number", v.trim()))
            })
        })
        .collect::<Result<Vec<f64>, ScoringError>>()?;
    FeatureVector::from_slice(&values)
}

/// Delimiter for a feature table: tab for `.tsv` (any case), comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Read a batch of feature vectors from a CSV (or TSV, by extension) file.
///
/// Columns are matched by header name so their order in the file does not
/// matter; extra columns are ignored. Every feature column is required.
pub fn read_feature_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FeatureVector>> {
    let path = path.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open feature file: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read feature header row")?
        .clone();

    let mut indices = Vec::with_capacity(N_FEATURES);
    for name in FEATURE_NAMES {
        let idx = headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
        indices.push(idx);
    }

    let mut vectors = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        let mut values = [0.0f64; N_FEATURES];
        for (slot, (&idx, name)) in indices.iter().zip(FEATURE_NAMES).enumerate() {
            let raw = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing '{}' at row {}", name, row_idx + 1))?;
            values[slot] = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid '{}' at row {}", name, row_idx + 1))?;
        }
        let vector = FeatureVector::from_slice(&values)
            .with_context(|| format!("Invalid feature vector at row {}", row_idx + 1))?;
        vectors.push(vector);
    }

    log::debug!("Read {} feature vectors from {}", vectors.len(), path.display());
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<f64> {
        vec![65.0, 0.0, 0.7, 0.1, 187.0, 16.0, 18.0, 6.8, 3.3, 0.9]
    }

    #[test]
    fn test_from_slice_preserves_order() {
        let v = FeatureVector::from_slice(&sample()).unwrap();
        assert_eq!(v.age, 65.0);
        assert_eq!(v.alkaline_phosphotase, 187.0);
        assert_eq!(v.albumin_globulin_ratio, 0.9);
        assert_eq!(v.to_array().to_vec(), sample());
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = FeatureVector::from_slice(&sample()[..9]).unwrap_err();
        assert!(matches!(err, ScoringError::MalformedInput(_)));
    }

    #[test]
    fn test_from_slice_rejects_nan() {
        let mut values = sample();
        values[4] = f64::NAN;
        let err = FeatureVector::from_slice(&values).unwrap_err();
        assert!(err.to_string().contains("Alkaline_Phosphotase"));
    }

    #[test]
    fn test_json_requires_every_field() {
        let json = r#"{"Age": 40, "Gender": 1}"#;
        assert!(serde_json::from_str::<FeatureVector>(json).is_err());
    }

    #[test]
    fn test_json_uses_column_names() {
        let v = FeatureVector::from_slice(&sample()).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"Albumin_and_Globulin_Ratio\""));
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_delimiter_ignores_extension_case() {
        assert_eq!(delimiter_for(Path::new("a.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("a.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("a.Csv")), b',');
        assert_eq!(delimiter_for(Path::new("a")), b',');
    }

    #[test]
    fn test_parse_feature_list() {
        let v = parse_feature_list("65, 0, 0.7, 0.1, 187, 16, 18, 6.8, 3.3, 0.9").unwrap();
        assert_eq!(v.total_proteins, 6.8);
        assert!(parse_feature_list("65, 0, abc").is_err());
    }
}
