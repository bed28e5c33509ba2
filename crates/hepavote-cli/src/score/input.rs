use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use hepavote_classifiers::features::parse_feature_list;
use hepavote_classifiers::{ArtifactConfig, FeatureVector};

/// Read an artifact configuration leniently: fields that are missing or
/// fail to parse keep their default value.
pub fn load_artifact_config(config_path: &PathBuf) -> Result<ArtifactConfig> {
    let config_json = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

    let partial: serde_json::Value = serde_json::from_str(&config_json)
        .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
    let mut config = ArtifactConfig::default();

    macro_rules! load_or_default {
        ($field:ident) => {
            if let Some(val) = partial.get(stringify!($field)) {
                if let Ok(parsed) = serde_json::from_value(val.clone()) {
                    config.$field = parsed;
                } else {
                    log::warn!(
                        "Config Invalid value for '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            } else {
                log::warn!(
                    "Config Missing field '{}', using default: {:?}",
                    stringify!($field), config.$field
                );
            }
        };
    }

    load_or_default!(bundle_path);
    load_or_default!(fallback_path);
    load_or_default!(legacy_batch_inversion);

    Ok(config)
}

/// Assemble the artifact configuration for a subcommand: the optional
/// `--config` file first, then `--bundle`, `--fallback` and, for `batch`,
/// `--legacy-inversion`.
pub fn artifact_config_from_arguments(matches: &ArgMatches) -> Result<ArtifactConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[hepavote] Using config: {:?}", config_path);
            load_artifact_config(config_path)?
        }
        None => {
            log::debug!("[hepavote] No config provided; using default artifact locations.");
            ArtifactConfig::default()
        }
    };

    // Apply CLI overrides
    if let Some(bundle) = matches.get_one::<PathBuf>("bundle") {
        config.bundle_path = bundle.clone();
    }
    if let Some(fallback) = matches.get_one::<PathBuf>("fallback") {
        config.fallback_path = fallback.clone();
    }
    if let Ok(Some(true)) = matches.try_get_one::<bool>("legacy_inversion") {
        config.legacy_batch_inversion = true;
    }

    Ok(config)
}

/// Read the single feature vector given to `predict`.
pub fn feature_vector_from_arguments(matches: &ArgMatches) -> Result<FeatureVector> {
    if let Some(values) = matches.get_one::<String>("values") {
        return Ok(parse_feature_list(values)?);
    }

    let input_path = matches
        .get_one::<PathBuf>("input")
        .context("Either --values or --input is required")?;
    let content = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file: {:?}", input_path))?;
    let features: FeatureVector = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse feature vector: {:?}", input_path))?;
    features.validate()?;
    Ok(features)
}
