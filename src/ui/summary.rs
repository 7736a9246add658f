use eframe::egui::{self, Grid, RichText, ScrollArea, Ui};

use rusty_csv::data::info::{column_details, dataset_info, type_distribution};
use rusty_csv::data::stats::summarize;

use crate::state::AppState;

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.2}"))
}

// ---------------------------------------------------------------------------
// Statistics view
// ---------------------------------------------------------------------------

pub fn statistics_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }
    if state.stats.is_empty() {
        ui.label("No numeric columns selected (see the side panel).");
        return;
    }

    let summary = summarize(&state.stats);
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Columns: {}", summary.columns));
        ui.separator();
        ui.label(format!("Values: {}", summary.total_values));
        ui.separator();
        ui.label(format!("Total sum: {:.2}", summary.total_sum));
        ui.separator();
        ui.label(format!("Mean of means: {}", fmt_stat(summary.overall_mean)));
    });
    ui.separator();

    ScrollArea::both().show(ui, |ui: &mut Ui| {
        Grid::new("stats_grid")
            .striped(true)
            .num_columns(8)
            .show(ui, |ui: &mut Ui| {
                ui.strong("column");
                for (name, _) in state.stats[0].entries() {
                    ui.strong(name);
                }
                ui.end_row();

                for stats in &state.stats {
                    ui.label(stats.column.as_str());
                    for (name, value) in stats.entries() {
                        if name == "count" {
                            ui.label(stats.count.to_string());
                        } else {
                            ui.label(fmt_stat(value));
                        }
                    }
                    ui.end_row();
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Dataset info view
// ---------------------------------------------------------------------------

pub fn info_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let info = dataset_info(dataset);
    ui.heading(format!("{} rows × {} columns", info.rows, info.columns));
    if let Some((sep, enc)) = state.detected {
        ui.label(format!("Separator {sep:?}, encoding {enc}"));
    }
    ui.label(format!(
        "{} distinct values, {} missing values",
        info.unique_values, info.missing_values
    ));

    let kinds: Vec<String> = type_distribution(dataset)
        .into_iter()
        .map(|(kind, n)| format!("{kind}: {n}"))
        .collect();
    ui.label(format!("Column types: {}", kinds.join(", ")));
    ui.add_space(6.0);

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        Grid::new("column_details")
            .striped(true)
            .num_columns(4)
            .show(ui, |ui: &mut Ui| {
                for header in ["column", "type", "distinct", "missing"] {
                    ui.strong(header);
                }
                ui.end_row();

                for detail in column_details(dataset) {
                    ui.label(detail.name.as_str());
                    ui.label(detail.kind.to_string());
                    ui.label(detail.unique.to_string());
                    let missing = RichText::new(detail.missing.to_string());
                    ui.label(if detail.missing > 0 {
                        missing.color(egui::Color32::LIGHT_RED)
                    } else {
                        missing
                    });
                    ui.end_row();
                }
            });
    });
}
