use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_csv::data::chart::ChartKind;
use rusty_csv::data::stats::numeric_columns;

use crate::state::{AppState, View};

const SEPARATOR_CHOICES: &[(Option<u8>, &str)] = &[
    (None, "Auto"),
    (Some(b','), "Comma"),
    (Some(b';'), "Semicolon"),
    (Some(b'\t'), "Tab"),
];

const ROW_INDEX_LABEL: &str = "(row index)";

const ENCODING_CHOICES: &[(Option<&str>, &str)] = &[
    (None, "Auto"),
    (Some("utf-8"), "UTF-8"),
    (Some("latin1"), "Latin-1"),
];

// ---------------------------------------------------------------------------
// Left side panel – loading, search, statistics and chart controls
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            loading_section(ui, state);
            ui.separator();

            if state.dataset.is_none() {
                ui.label("No dataset loaded.");
                return;
            }

            search_section(ui, state);
            ui.separator();
            statistics_section(ui, state);
            ui.separator();
            chart_section(ui, state);
        });
}

fn loading_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("File");

    let sep_label = SEPARATOR_CHOICES
        .iter()
        .find(|(v, _)| *v == state.separator_hint)
        .map_or("Auto", |(_, l)| *l);
    egui::ComboBox::from_label("Separator")
        .selected_text(sep_label)
        .show_ui(ui, |ui: &mut Ui| {
            for (value, label) in SEPARATOR_CHOICES {
                ui.selectable_value(&mut state.separator_hint, *value, *label);
            }
        });

    let enc_label = ENCODING_CHOICES
        .iter()
        .find(|(v, _)| *v == state.encoding_hint.as_deref())
        .map_or("Auto", |(_, l)| *l);
    egui::ComboBox::from_label("Encoding")
        .selected_text(enc_label)
        .show_ui(ui, |ui: &mut Ui| {
            for (value, label) in ENCODING_CHOICES {
                let selected = *value == state.encoding_hint.as_deref();
                if ui.selectable_label(selected, *label).clicked() {
                    state.encoding_hint = value.map(str::to_string);
                }
            }
        });

    if ui.button("Open…").clicked() {
        open_file_dialog(state);
    }
}

fn search_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search");
    let mut text = state.search_text.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text).hint_text("Type to filter rows…"),
    );
    if response.changed() {
        state.set_search_text(text);
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Max rows");
        ui.add(
            egui::DragValue::new(&mut state.max_display_rows)
                .range(10..=10_000)
                .speed(10),
        );
    });
}

fn statistics_section(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let numeric = numeric_columns(ds);

    egui::CollapsingHeader::new(RichText::new("Statistics columns").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if numeric.is_empty() {
                ui.label("No numeric columns.");
            }
            for col in &numeric {
                let mut checked = state.stat_columns.contains(col);
                if ui.checkbox(&mut checked, col.as_str()).changed() {
                    state.toggle_stat_column(col);
                }
            }
        });
}

fn chart_section(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let columns = ds.column_names();
    let numeric = numeric_columns(ds);

    ui.heading("Chart");
    ui.horizontal(|ui: &mut Ui| {
        for kind in [ChartKind::Line, ChartKind::Bar] {
            let label = match kind {
                ChartKind::Line => "Line",
                ChartKind::Bar => "Bar",
            };
            if ui.selectable_label(state.chart_kind == kind, label).clicked() {
                state.set_chart_kind(kind);
            }
        }
    });

    let current_x = state.x_column.clone();
    egui::ComboBox::from_label("X axis")
        .selected_text(current_x.as_deref().unwrap_or(ROW_INDEX_LABEL))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current_x.is_none(), ROW_INDEX_LABEL).clicked() {
                state.set_x_column(None);
            }
            for col in &columns {
                let selected = current_x.as_ref() == Some(col);
                if ui.selectable_label(selected, col.as_str()).clicked() {
                    state.set_x_column(Some(col.clone()));
                }
            }
        });

    ui.label("Y axis");
    for col in &numeric {
        let mut checked = state.y_columns.contains(col);
        if ui.checkbox(&mut checked, col.as_str()).changed() {
            state.toggle_y_column(col);
        }
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Max points");
        let response = ui.add(
            egui::DragValue::new(&mut state.max_chart_points)
                .range(50..=10_000)
                .speed(10),
        );
        if response.changed() {
            state.rebuild_chart();
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for (view, label) in [
            (View::Table, "Table"),
            (View::Statistics, "Statistics"),
            (View::Chart, "Chart"),
            (View::Info, "Info"),
        ] {
            ui.selectable_value(&mut state.view, view, label);
        }

        ui.separator();

        if let (Some(ds), Some(name)) = (&state.dataset, &state.file_name) {
            ui.label(format!(
                "{name}: {} rows, {} columns, {} matching",
                ds.n_rows(),
                ds.n_cols(),
                state.visible_rows.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV file")
        .add_filter("CSV", &["csv", "tsv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match state.load_path(&path) {
            Ok(()) => state.view = View::Table,
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
