use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgGroup, Command, ValueHint};

/// Build the `hepavote` command tree.
///
/// Artifact location flags are global so they can follow any subcommand.
pub fn build_cli() -> Command {
    Command::new("hepavote")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("\u{1FA7A} hepavote - Liver disease prediction by majority vote of k-NN, random forest and SVM")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON artifact configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("bundle")
                .long("bundle")
                .help(
                    "Path to the three-member ensemble bundle (*.json). \
                     Overrides the bundle_path specified in the configuration file.",
                )
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .help(
                    "Path to the single k-NN model used when the bundle is missing. \
                     Overrides the fallback_path specified in the configuration file.",
                )
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("features").about("List the input features in the order the models expect"),
        )
        .subcommand(
            Command::new("info").about("Load the models and report the active mode and bundle metrics"),
        )
        .subcommand(
            Command::new("predict")
                .about("Score one patient and print the decision as JSON")
                .arg(
                    Arg::new("values")
                        .long("values")
                        .help("Ten comma-separated measurements in feature order (see `hepavote features`)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .allow_hyphen_values(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Path to a JSON object keyed by feature name")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .group(
                    ArgGroup::new("source")
                        .args(["values", "input"])
                        .required(true),
                )
                .arg(
                    Arg::new("user")
                        .short('u')
                        .long("user")
                        .help("Also emit the prediction history record for this user")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Username),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Score every row of a CSV or TSV file")
                .arg(
                    Arg::new("input")
                        .help("Path to the patient table (*.csv or *.tsv) with one column per feature")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path to write the scored rows (*.csv or *.tsv). Defaults to stdout (TSV).")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("legacy_inversion")
                        .long("legacy-inversion")
                        .help("Flip every batch label the way the legacy batch endpoint did.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
}
