use std::path::Path;

use anyhow::{bail, Context, Result};

use super::table::Table;

// ---------------------------------------------------------------------------
// CSV upload
// ---------------------------------------------------------------------------

/// Load an uploaded CSV into a raw [`Table`].
///
/// Layout: UTF-8, comma-separated, header row defines column names. Any
/// column set is accepted; whether the table is scorable is decided later by
/// the predictor. Ragged rows are a parse error.
pub fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() {
        bail!("CSV file has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(Table { headers, rows })
}

// ---------------------------------------------------------------------------
// Manual input
// ---------------------------------------------------------------------------

/// Parse one manually-entered feature line: comma-separated decimals, in the
/// model's trained feature order.
pub fn parse_feature_line(line: &str) -> Result<Vec<f64>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        bail!("no values entered");
    }

    trimmed
        .split(',')
        .enumerate()
        .map(|(idx, token)| {
            let token = token.trim();
            token
                .parse::<f64>()
                .with_context(|| format!("value {}: '{token}' is not a number", idx + 1))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
