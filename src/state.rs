use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::loader;
use crate::data::table::{ScoredTable, Table};
use crate::model::Predictor;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which input surface is active. The two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Batch,
    Manual,
}

/// Severity of the status line in the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Status / error message shown in the UI.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Batch tab state: the last scored upload, if any.
#[derive(Default)]
pub struct BatchState {
    /// File name of the scored upload, for display.
    pub source_name: Option<String>,
    /// The scored table (None until a CSV scores successfully).
    pub scored: Option<ScoredTable>,
}

/// Manual tab state: the input line and the last result.
#[derive(Default)]
pub struct ManualState {
    pub input: String,
    pub result: Option<f64>,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Shared handle to the model loaded at startup.
    pub predictor: Arc<Predictor>,
    pub tab: Tab,
    pub batch: BatchState,
    pub manual: ManualState,
    pub status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(predictor: Arc<Predictor>) -> Self {
        AppState {
            predictor,
            tab: Tab::Batch,
            batch: BatchState::default(),
            manual: ManualState::default(),
            status: None,
        }
    }

    pub(crate) fn set_success(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Success,
            text: text.into(),
        });
    }

    pub(crate) fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    // -----------------------------------------------------------------------
    // Batch handler
    // -----------------------------------------------------------------------

    /// Score an uploaded CSV end to end: parse, predict every row, keep the
    /// augmented table for display and export. Any failure along the way is
    /// surfaced as one status message and produces no partial result.
    pub fn score_file(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match loader::load_csv(path).and_then(|table| self.score_table(table)) {
            Ok(num_rows) => {
                log::info!("scored {num_rows} rows from {name}");
                self.batch.source_name = Some(name);
                self.set_success(format!("Prediction completed! Scored {num_rows} rows."));
            }
            Err(err) => {
                log::error!("batch prediction for {name} failed: {err:#}");
                self.batch.source_name = None;
                self.batch.scored = None;
                self.set_error(format!("Error: {err:#}"));
            }
        }
    }

    fn score_table(&mut self, table: Table) -> Result<usize> {
        let features = table.to_feature_rows()?;
        let predictions = self
            .predictor
            .predict(&features)
            .context("scoring uploaded rows")?;
        let scored = ScoredTable::new(table, predictions);
        let num_rows = scored.num_rows();
        self.batch.scored = Some(scored);
        Ok(num_rows)
    }

    // -----------------------------------------------------------------------
    // Manual handler
    // -----------------------------------------------------------------------

    /// Score the manually-entered feature line. Reported errors stay
    /// generic; the parse detail goes to the log only.
    pub fn run_manual(&mut self) {
        match self.try_run_manual() {
            Ok(value) => {
                log::info!("manual prediction: {value}");
                self.manual.result = Some(value);
                self.status = None;
            }
            Err(err) => {
                log::error!("manual prediction failed: {err:#}");
                self.manual.result = None;
                self.set_error("Invalid input format. Enter values like: 12, 45, 3.4, 89");
            }
        }
    }

    fn try_run_manual(&mut self) -> Result<f64> {
        let row = loader::parse_feature_line(&self.manual.input)?;
        let value = self
            .predictor
            .predict_row(&row)
            .context("scoring entered row")?;
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelArtifact, TreeNodes};

    /// Two-feature stump model: f0 < 2.0 → -1.0 else 1.0, base 0.5.
    fn state() -> AppState {
        let artifact = ModelArtifact {
            version: 1,
            num_features: 2,
            feature_names: vec!["size".into(), "weight".into()],
            base_score: 0.5,
            trees: vec![TreeNodes {
                feature: vec![0, -1, -1],
                threshold: vec![2.0, 0.0, 0.0],
                left: vec![1, 0, 0],
                right: vec![2, 0, 0],
                value: vec![0.0, -1.0, 1.0],
            }],
        };
        AppState::new(Arc::new(Predictor::from_artifact(artifact).unwrap()))
    }

    fn table(rows: Vec<Vec<&str>>) -> Table {
        Table {
            headers: vec!["size".into(), "weight".into()],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn scored_table_keeps_row_count_and_adds_one_column() {
        let mut state = state();
        let input = table(vec![vec!["1", "10"], vec!["3", "20"]]);
        let num_cols = input.num_cols();

        let num_rows = state.score_table(input).unwrap();
        assert_eq!(num_rows, 2);

        let scored = state.batch.scored.as_ref().unwrap();
        assert_eq!(scored.num_rows(), 2);
        assert_eq!(scored.headers().len(), num_cols + 1);
        assert_eq!(scored.predictions, vec![-0.5, 1.5]);
    }

    #[test]
    fn non_numeric_cell_fails_the_whole_batch() {
        let mut state = state();
        assert!(state
            .score_table(table(vec![vec!["1", "10"], vec!["x", "20"]]))
            .is_err());
        assert!(state.batch.scored.is_none());
    }

    #[test]
    fn wrong_column_count_fails_the_whole_batch() {
        let mut state = state();
        let input = Table {
            headers: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![vec!["1".into(), "2".into(), "3".into()]],
        };
        assert!(state.score_table(input).is_err());
        assert!(state.batch.scored.is_none());
    }

    #[test]
    fn manual_input_produces_exactly_one_scalar() {
        let mut state = state();
        state.manual.input = "1, 10".into();
        state.run_manual();
        assert_eq!(state.manual.result, Some(-0.5));
        assert!(state.status.is_none());
    }

    #[test]
    fn manual_non_numeric_token_is_a_generic_error() {
        let mut state = state();
        state.manual.input = "12,abc,3.4".into();
        state.run_manual();

        assert_eq!(state.manual.result, None);
        let status = state.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("Invalid input format"));
        // No per-token detail leaks into the UI message.
        assert!(!status.text.contains("abc"));
    }

    #[test]
    fn manual_wrong_token_count_is_an_error_not_a_truncated_prediction() {
        let mut state = state();
        state.manual.input = "1, 2, 3".into();
        state.run_manual();
        assert_eq!(state.manual.result, None);
        assert_eq!(state.status.unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn failed_batch_clears_the_previous_result() {
        let mut state = state();
        state.score_table(table(vec![vec!["1", "10"]])).unwrap();
        assert!(state.batch.scored.is_some());

        state.score_file(Path::new("/nonexistent/upload.csv"));
        assert!(state.batch.scored.is_none());
        assert_eq!(state.status.unwrap().kind, StatusKind::Error);
    }
}
