use anyhow::{Context, Result};

/// Name of the column appended to scored tables.
pub const PREDICTIONS_COLUMN: &str = "Predictions";

// ---------------------------------------------------------------------------
// Table – one uploaded CSV, verbatim
// ---------------------------------------------------------------------------

/// An uploaded table: header row plus rows of raw string fields, exactly as
/// they appeared in the file. Fields stay untyped so the export reproduces
/// the input bytes; numeric conversion happens only when scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Data rows; every row has `headers.len()` fields.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.headers.len()
    }

    /// The first `n` rows, for the preview grid.
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Parse every cell as `f64`, producing one feature row per data row.
    /// Any non-numeric cell fails the whole table.
    pub fn to_feature_rows(&self) -> Result<Vec<Vec<f64>>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row_no, row)| {
                row.iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        cell.trim().parse::<f64>().with_context(|| {
                            format!(
                                "Row {row_no}, column '{}': '{cell}' is not a number",
                                self.headers[col]
                            )
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ScoredTable – table + one prediction per row
// ---------------------------------------------------------------------------

/// A scored batch: the original table with exactly one prediction per row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTable {
    pub table: Table,
    pub predictions: Vec<f64>,
}

impl ScoredTable {
    /// Pair a table with its predictions. Lengths must already match; the
    /// predictor guarantees one output per input row.
    pub fn new(table: Table, predictions: Vec<f64>) -> Self {
        debug_assert_eq!(table.num_rows(), predictions.len());
        ScoredTable { table, predictions }
    }

    /// Number of scored rows.
    pub fn num_rows(&self) -> usize {
        self.table.num_rows()
    }

    /// Original headers plus the appended predictions column.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = self.table.headers.clone();
        headers.push(PREDICTIONS_COLUMN.to_string());
        headers
    }

    /// Render one output row: the raw input fields plus the formatted
    /// prediction. `f64` Display is shortest-round-trip, so repeat exports
    /// of the same scored table are byte-identical.
    pub fn output_row(&self, idx: usize) -> Vec<String> {
        let mut row = self.table.rows[idx].clone();
        row.push(self.predictions[idx].to_string());
        row
    }

    /// Encode the scored table as UTF-8 CSV bytes for download.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut bytes);
            writer
                .write_record(self.headers())
                .context("writing CSV header")?;
            for idx in 0..self.num_rows() {
                writer
                    .write_record(self.output_row(idx))
                    .with_context(|| format!("writing CSV row {idx}"))?;
            }
            writer.flush().context("flushing CSV output")?;
        }
        Ok(bytes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            headers: vec!["a".into(), "b".into()],
            rows: vec![
                vec!["1".into(), "2.5".into()],
                vec!["3".into(), "4".into()],
            ],
        }
    }

    #[test]
    fn feature_rows_parse_every_cell() {
        let rows = table().to_feature_rows().unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.5], vec![3.0, 4.0]]);
    }

    #[test]
    fn non_numeric_cell_fails_the_whole_table() {
        let mut t = table();
        t.rows[1][0] = "oops".into();
        let err = t.to_feature_rows().unwrap_err();
        assert!(err.to_string().contains("'oops' is not a number"));
    }

    #[test]
    fn preview_is_capped_at_available_rows() {
        let t = table();
        assert_eq!(t.preview(1).len(), 1);
        assert_eq!(t.preview(10).len(), 2);
    }

    #[test]
    fn scored_table_appends_exactly_one_column() {
        let scored = ScoredTable::new(table(), vec![10.0, 20.0]);
        assert_eq!(scored.headers(), ["a", "b", "Predictions"]);
        assert_eq!(scored.headers().len(), scored.table.num_cols() + 1);
        assert_eq!(scored.num_rows(), 2);
        assert_eq!(scored.output_row(0), ["1", "2.5", "10"]);
    }

    #[test]
    fn csv_round_trip_reproduces_rows_and_predictions() {
        let scored = ScoredTable::new(table(), vec![10.5, -0.25]);
        let bytes = scored.to_csv_bytes().unwrap();

        let mut reader = csv::Reader::from_reader(&bytes[..]);
        let headers: Vec<String> =
            reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, ["a", "b", "Predictions"]);

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["1".to_string(), "2.5".into(), "10.5".into()],
                vec!["3".to_string(), "4".into(), "-0.25".into()],
            ]
        );
    }

    #[test]
    fn repeat_exports_are_byte_identical() {
        let scored = ScoredTable::new(table(), vec![0.1, 2.0 / 3.0]);
        assert_eq!(
            scored.to_csv_bytes().unwrap(),
            scored.to_csv_bytes().unwrap()
        );
    }
}
