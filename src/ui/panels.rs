use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::table::ScoredTable;
use crate::state::{AppState, StatusKind, Tab};

/// Default file name offered by the save dialog.
const DOWNLOAD_FILE_NAME: &str = "predictions.csv";

const PREVIEW_ROWS: usize = 5;
const HEADER_HEIGHT: f32 = 20.0;
const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "model: {} features, {} trees",
            state.predictor.num_features(),
            state.predictor.num_trees()
        ));

        ui.separator();

        if let Some(status) = &state.status {
            let color = match status.kind {
                StatusKind::Success => Color32::DARK_GREEN,
                StatusKind::Error => Color32::RED,
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – heading + tabs
// ---------------------------------------------------------------------------

/// Render the heading, the tab selector, and the active tab.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regression Model – Prediction App");
    ui.label("Upload a CSV file or manually enter values to get predictions.");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::Batch, "Upload CSV");
        ui.selectable_value(&mut state.tab, Tab::Manual, "Manual Input");
    });
    ui.separator();

    match state.tab {
        Tab::Batch => batch_panel(ui, state),
        Tab::Manual => manual_panel(ui, state),
    }
}

/// Footer caption under the central panel.
pub fn footer(ui: &mut Ui) {
    ui.small("Predictions are served from the pre-trained model artifact (model.json).");
}

// ---------------------------------------------------------------------------
// Batch tab
// ---------------------------------------------------------------------------

fn batch_panel(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Upload a CSV file for batch prediction");
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Open CSV…").clicked() {
            open_csv_dialog(state);
        }
        if let Some(name) = &state.batch.source_name {
            ui.label(name);
        }
    });
    ui.add_space(4.0);

    let Some(scored) = &state.batch.scored else {
        ui.label("No file scored yet.");
        return;
    };

    // The save dialog needs `&mut state`, so defer it past the grid borrows.
    let mut save_clicked = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let preview_len = scored.table.preview(PREVIEW_ROWS).len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Preview (first {preview_len} rows)")).strong(),
            )
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.push_id("preview_grid", |ui: &mut Ui| {
                    preview_grid(ui, scored);
                });
            });

            ui.add_space(4.0);
            ui.push_id("scored_grid", |ui: &mut Ui| {
                scored_grid(ui, scored);
            });

            ui.add_space(8.0);
            if ui.button("Download Predictions CSV").clicked() {
                save_clicked = true;
            }
        });

    if save_clicked {
        save_predictions_dialog(state);
    }
}

/// Head of the uploaded table, without the predictions column.
fn preview_grid(ui: &mut Ui, scored: &ScoredTable) {
    let table = &scored.table;
    let preview = table.preview(PREVIEW_ROWS);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(60.0), table.num_cols())
        .header(HEADER_HEIGHT, |mut header| {
            for name in &table.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, preview.len(), |mut row| {
                let idx = row.index();
                for cell in &preview[idx] {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// The full augmented table: every uploaded column plus `Predictions`.
fn scored_grid(ui: &mut Ui, scored: &ScoredTable) {
    let headers = scored.headers();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(60.0), headers.len())
        .header(HEADER_HEIGHT, |mut header| {
            for name in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, scored.num_rows(), |mut row| {
                let idx = row.index();
                for cell in scored.output_row(idx) {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Manual tab
// ---------------------------------------------------------------------------

fn manual_panel(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Enter values manually");

    // The feature contract comes from the artifact metadata, never the UI.
    let names = state.predictor.feature_names();
    let hint = if names.is_empty() {
        format!(
            "Enter {} comma-separated values in the trained feature order.",
            state.predictor.num_features()
        )
    } else {
        format!("Feature order: {}", names.join(", "))
    };
    ui.label(hint);
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.text_edit_singleline(&mut state.manual.input);
        if ui.button("Predict").clicked() {
            state.run_manual();
        }
    });

    if let Some(value) = state.manual.result {
        ui.add_space(8.0);
        ui.heading(format!("Predicted Value: {value}"));
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV for batch prediction")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.tab = Tab::Batch;
        state.score_file(&path);
    }
}

fn save_predictions_dialog(state: &mut AppState) {
    let encoded = match state.batch.scored.as_ref().map(|s| s.to_csv_bytes()) {
        None => return,
        Some(Ok(bytes)) => bytes,
        Some(Err(err)) => {
            log::error!("encoding predictions failed: {err:#}");
            state.set_error(format!("Error: {err:#}"));
            return;
        }
    };

    let target = rfd::FileDialog::new()
        .set_title("Save predictions")
        .set_file_name(DOWNLOAD_FILE_NAME)
        .save_file();

    if let Some(path) = target {
        match std::fs::write(&path, &encoded) {
            Ok(()) => {
                log::info!("wrote predictions to {path:?}");
                state.set_success(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("writing {path:?} failed: {err}");
                state.set_error(format!("Error: {err}"));
            }
        }
    }
}
