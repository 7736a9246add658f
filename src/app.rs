use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, plot, summary, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyCsvApp {
    pub state: AppState,
}

impl RustyCsvApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RustyCsvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: loading, search, stats and chart controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Table => table::data_table(ui, &self.state),
            View::Statistics => summary::statistics_view(ui, &self.state),
            View::Chart => plot::chart_view(ui, &self.state),
            View::Info => summary::info_view(ui, &self.state),
        });
    }
}
