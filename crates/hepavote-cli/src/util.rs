use anyhow::Result;
use std::path::Path;

/// Batch files must exist and carry a `.csv` or `.tsv` extension.
pub fn validate_tsv_or_csv_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    match extension_lowercase(path).as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!(
            "File must have a .tsv or .csv extension: {}",
            path.display()
        ),
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}
