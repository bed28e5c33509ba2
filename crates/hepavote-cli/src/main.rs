use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;
use std::path::PathBuf;

use hepavote_classifiers::{ArtifactConfig, EnsembleScorer};
use hepavote_cli::cli::build_cli;
use hepavote_cli::score::commands::{self, InfoSummary};
use hepavote_cli::score::input::{artifact_config_from_arguments, feature_vector_from_arguments};
use hepavote_cli::score::output::write_batch_output;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("HEPAVOTE_LOG", "error,hepavote=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("features", _)) => {
            print!("{}", commands::feature_listing());
            Ok(())
        }
        Some(("info", sub_m)) => handle_info(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        Some(("batch", sub_m)) => handle_batch(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

/// Models are loaded once per invocation; a load failure ends the process.
fn load_scorer(matches: &ArgMatches) -> Result<(ArtifactConfig, EnsembleScorer)> {
    let config = artifact_config_from_arguments(matches)?;
    match EnsembleScorer::initialize(&config) {
        Ok(scorer) => Ok((config, scorer)),
        Err(e) => {
            log::error!("Model loading failed: {}", e);
            std::process::exit(1)
        }
    }
}

fn handle_info(matches: &ArgMatches) -> Result<()> {
    let (config, scorer) = load_scorer(matches)?;
    let summary = InfoSummary::new(&config, &scorer);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let (_, scorer) = load_scorer(matches)?;
    let user = matches.get_one::<String>("user").map(String::as_str);

    let result = feature_vector_from_arguments(matches)
        .and_then(|features| commands::predict(&scorer, &features, user));
    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_batch(matches: &ArgMatches) -> Result<()> {
    let input: &PathBuf = matches.get_one("input").unwrap();
    let output_path: Option<&PathBuf> = matches.get_one("output_file");
    let (_, scorer) = load_scorer(matches)?;

    match commands::batch(&scorer, input) {
        Ok(results) => {
            write_batch_output(&results, output_path.map(PathBuf::as_path))?;
            log::info!("[hepavote] Completed scoring {} rows.", results.len());
            Ok(())
        }
        Err(e) => {
            log::error!("Batch scoring failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
