use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use hepavote_classifiers::features::delimiter_for;
use hepavote_classifiers::{BatchDecision, ModelKind};

const MEMBERS: [ModelKind; 3] = [ModelKind::Knn, ModelKind::RandomForest, ModelKind::Svm];

/// Write batch decisions to `output_path` (CSV or TSV by extension), or to
/// stdout as TSV when no path is given.
pub fn write_batch_output(results: &[BatchDecision], output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            write_batch_decisions(results, BufWriter::new(file), delimiter_for(path))?;
            log::info!("[hepavote] Wrote {} scored rows to {:?}", results.len(), path);
        }
        None => {
            let stdout = io::stdout();
            write_batch_decisions(results, stdout.lock(), b'\t')?;
        }
    }
    Ok(())
}

/// One row per decision. Member columns hold that member's vote, or stay
/// empty when the member did not take part (degraded mode).
pub fn write_batch_decisions<W: Write>(
    results: &[BatchDecision],
    writer: W,
    delimiter: u8,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let mut header = vec!["index", "prediction", "status", "confidence", "agreement", "mode"];
    header.extend(MEMBERS.iter().map(|kind| kind.as_str()));
    writer.write_record(&header)?;

    for entry in results {
        let decision = &entry.decision;
        let mut row = vec![
            entry.index.to_string(),
            decision.prediction.as_u8().to_string(),
            decision.status.clone(),
            format!("{:.2}", decision.confidence),
            decision.agreement.map_or(String::new(), |a| a.to_string()),
            decision.mode.as_str().to_string(),
        ];
        for kind in MEMBERS {
            let vote = decision
                .votes
                .iter()
                .find(|v| v.classifier == kind)
                .map_or(String::new(), |v| v.label.as_u8().to_string());
            row.push(vote);
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
