use std::ops::RangeInclusive;

use chrono::DateTime;
use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use rusty_csv::data::chart::{ChartKind, ChartSeries, ChartX};

use crate::color::series_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart (central panel, "Chart" view)
// ---------------------------------------------------------------------------

pub fn chart_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to draw charts");
        });
        return;
    }

    if let Some(msg) = &state.chart_message {
        ui.label(RichText::new(msg).color(Color32::YELLOW));
    }
    let Some(first) = state.chart_series.first() else {
        ui.label("Nothing to plot for the current selection.");
        return;
    };
    if first.date_sorted {
        ui.label("X values are dates: points are in chronological order.");
    }
    for (i, series) in state.chart_series.iter().enumerate() {
        let summary = series.y_summary();
        let fmt = |v: Option<f64>| v.map_or("—".to_string(), |v| format!("{v:.2}"));
        ui.label(
            RichText::new(format!(
                "{}: {} points, min {}, max {}, mean {}",
                series.y_column,
                series.len(),
                fmt(summary.min),
                fmt(summary.max),
                fmt(summary.mean)
            ))
            .color(series_color(i)),
        );
    }

    let mut plot = Plot::new("chart")
        .legend(Legend::default())
        .x_axis_label(first.x_column.clone().unwrap_or_else(|| "row".to_string()))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(formatter) = x_axis_formatter(first) {
        plot = plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            formatter(mark.value)
        });
    }

    plot.show(ui, |plot_ui| {
        let n_series = state.chart_series.len();
        for (i, series) in state.chart_series.iter().enumerate() {
            let color = series_color(i);
            match series.kind {
                ChartKind::Line => {
                    let points: PlotPoints = (0..series.len())
                        .map(|j| [series.x_position(j), series.y[j]])
                        .collect();
                    let line = Line::new(points)
                        .name(&series.y_column)
                        .color(color)
                        .width(1.5);
                    plot_ui.line(line);
                }
                ChartKind::Bar => {
                    let slot = bar_slot(series) / n_series as f64;
                    let offset = (i as f64 - (n_series as f64 - 1.0) / 2.0) * slot;
                    let bars: Vec<Bar> = (0..series.len())
                        .map(|j| {
                            Bar::new(series.x_position(j) + offset, series.y[j]).width(slot * 0.9)
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&series.y_column).color(color));
                }
            }
        }
    });
}

/// Width available to the bars at one X position: the smallest gap between
/// neighbouring X values.
fn bar_slot(series: &ChartSeries) -> f64 {
    let mut xs: Vec<f64> = (0..series.len()).map(|i| series.x_position(i)).collect();
    xs.sort_by(f64::total_cmp);
    let gap = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if gap.is_finite() { gap * 0.8 } else { 0.8 }
}

/// Tick labels: dates for date axes, category names for text axes.  Numeric
/// axes keep the default ticks.
fn x_axis_formatter(series: &ChartSeries) -> Option<Box<dyn Fn(f64) -> String>> {
    match series.x.first()? {
        ChartX::Date(_) => Some(Box::new(|v: f64| {
            DateTime::from_timestamp(v as i64, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })),
        ChartX::Label(_) => {
            let labels: Vec<String> = series.x.iter().map(|x| x.to_string()).collect();
            Some(Box::new(move |v: f64| {
                let idx = v.round();
                if (v - idx).abs() < 1e-6 && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            }))
        }
        ChartX::Number(_) => None,
    }
}
