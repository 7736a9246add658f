use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_csv::data::model::CellValue;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data table (central panel, "Table" view)
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to get started  (File → Open…)");
        });
        return;
    };

    let rows = state.displayed_rows();
    if rows.len() < state.visible_rows.len() {
        ui.label(format!(
            "Showing {} of {} matching rows",
            rows.len(),
            state.visible_rows.len()
        ));
    } else if !state.search_text.trim().is_empty() {
        ui.label(format!("{} matching rows", rows.len()));
    }

    let columns = dataset.columns();
    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0))
            .columns(Column::auto().at_least(80.0).clip(true), columns.len())
            .header(row_height, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col.name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, rows.len(), |mut row| {
                    let idx = rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.weak(idx.to_string());
                    });
                    for col in columns {
                        row.col(|ui: &mut Ui| match &col.values[idx] {
                            CellValue::Missing => {
                                ui.weak("NA");
                            }
                            CellValue::Number(_) => {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui: &mut Ui| ui.label(col.values[idx].to_string()),
                                );
                            }
                            CellValue::Text(s) => {
                                ui.label(s.as_str());
                            }
                        });
                    }
                });
            });
    });
}
