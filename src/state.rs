use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use rusty_csv::config::ViewerConfig;
use rusty_csv::data::chart::{
    prepare_chart_data, validate_chart_requirements, ChartKind, ChartSeries,
};
use rusty_csv::data::filter::matching_rows;
use rusty_csv::data::loader::{load_csv, LoadOptions};
use rusty_csv::data::model::Dataset;
use rusty_csv::data::stats::{column_statistics, numeric_columns, ColumnStats};
use rusty_csv::error::DataResult;

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Table,
    Statistics,
    Chart,
    Info,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one viewer session holds, independent of rendering.
pub struct AppState {
    load_options: LoadOptions,

    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<Dataset>,
    pub file_name: Option<String>,
    /// Separator and encoding the loader settled on.
    pub detected: Option<(char, &'static str)>,

    /// Loader hints chosen in the UI; `None` means auto-detect.
    pub separator_hint: Option<u8>,
    pub encoding_hint: Option<String>,

    pub view: View,

    pub search_text: String,
    /// Indices of rows matching `search_text`.
    pub visible_rows: Vec<usize>,
    pub max_display_rows: usize,

    /// Columns the statistics view covers.
    pub stat_columns: Vec<String>,
    pub stats: Vec<ColumnStats>,

    pub chart_kind: ChartKind,
    pub x_column: Option<String>,
    pub y_columns: Vec<String>,
    pub max_chart_points: usize,
    pub chart_series: Vec<ChartSeries>,
    /// Set when the last chart request could not be drawn in full.
    pub chart_message: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ViewerConfig::default(), LoadOptions::default())
    }
}

impl AppState {
    pub fn new(config: &ViewerConfig, load_options: LoadOptions) -> Self {
        Self {
            max_display_rows: config.max_display_rows,
            max_chart_points: config.max_chart_points,
            load_options,
            dataset: None,
            file_name: None,
            detected: None,
            separator_hint: None,
            encoding_hint: None,
            view: View::default(),
            search_text: String::new(),
            visible_rows: Vec::new(),
            stat_columns: Vec::new(),
            stats: Vec::new(),
            chart_kind: ChartKind::default(),
            x_column: None,
            y_columns: Vec::new(),
            chart_series: Vec::new(),
            chart_message: None,
            status_message: None,
        }
    }

    /// Read a file from disk and load it.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_bytes(&name, &bytes)
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Parse uploaded bytes and make the result the current dataset.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> DataResult<()> {
        let start = Instant::now();
        let loaded = load_csv(
            bytes,
            self.separator_hint,
            self.encoding_hint.as_deref(),
            &self.load_options,
        )?;
        log::info!(
            "Loaded {name}: {} rows × {} columns (separator {:?}, {}) in {:.3}s",
            loaded.dataset.n_rows(),
            loaded.dataset.n_cols(),
            loaded.separator as char,
            loaded.encoding.name(),
            start.elapsed().as_secs_f64()
        );
        self.file_name = Some(name.to_string());
        self.detected = Some((loaded.separator as char, loaded.encoding.name()));
        self.set_dataset(loaded.dataset);
        Ok(())
    }

    /// Ingest a new dataset, replacing the old one and everything derived from it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let numeric = numeric_columns(&dataset);

        self.search_text.clear();
        self.visible_rows = (0..dataset.n_rows()).collect();

        // Default chart: first column against the first numeric column
        // that is not the X column.
        self.x_column = dataset.column_names().into_iter().next();
        self.y_columns = numeric
            .iter()
            .find(|c| Some(*c) != self.x_column.as_ref())
            .cloned()
            .into_iter()
            .collect();
        self.chart_series.clear();
        self.chart_message = None;

        self.stat_columns = numeric;
        self.dataset = Some(dataset);
        self.status_message = None;

        self.recompute_stats();
        self.rebuild_chart();
    }

    pub fn set_search_text(&mut self, text: String) {
        self.search_text = text;
        self.refilter();
    }

    /// Recompute `visible_rows` after the search text changed.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let start = Instant::now();
        self.visible_rows = matching_rows(ds, &self.search_text);
        if !self.search_text.trim().is_empty() {
            log::info!(
                "Filter {:?}: {} of {} rows in {:.3}s",
                self.search_text,
                self.visible_rows.len(),
                ds.n_rows(),
                start.elapsed().as_secs_f64()
            );
        }
    }

    /// Rows shown in the table: the matches, capped at `max_display_rows`.
    pub fn displayed_rows(&self) -> &[usize] {
        let n = self.visible_rows.len().min(self.max_display_rows);
        &self.visible_rows[..n]
    }

    pub fn toggle_stat_column(&mut self, column: &str) {
        if let Some(pos) = self.stat_columns.iter().position(|c| c == column) {
            self.stat_columns.remove(pos);
        } else if let Some(ds) = &self.dataset {
            // Keep dataset column order.
            let selected: Vec<String> = ds
                .column_names()
                .into_iter()
                .filter(|c| c == column || self.stat_columns.contains(c))
                .collect();
            self.stat_columns = selected;
        }
        self.recompute_stats();
    }

    pub fn recompute_stats(&mut self) {
        let Some(ds) = &self.dataset else {
            self.stats.clear();
            return;
        };
        match column_statistics(ds, Some(self.stat_columns.as_slice())) {
            Ok(stats) => self.stats = stats,
            Err(e) => {
                log::warn!("Statistics failed: {e}");
                self.stats.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn toggle_y_column(&mut self, column: &str) {
        if let Some(pos) = self.y_columns.iter().position(|c| c == column) {
            self.y_columns.remove(pos);
        } else {
            self.y_columns.push(column.to_string());
        }
        self.rebuild_chart();
    }

    /// `None` plots against the row index.
    pub fn set_x_column(&mut self, column: Option<String>) {
        self.x_column = column;
        self.rebuild_chart();
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart_kind = kind;
        for series in &mut self.chart_series {
            series.kind = kind;
        }
    }

    /// Validate and prepare one series per selected Y column.
    pub fn rebuild_chart(&mut self) {
        self.chart_series.clear();
        self.chart_message = None;

        let Some(ds) = &self.dataset else {
            return;
        };
        let x = self.x_column.as_deref();
        let x_label = x.unwrap_or("row index");
        if self.y_columns.is_empty() {
            self.chart_message = Some("Select at least one Y column".into());
            return;
        }

        let start = Instant::now();
        let mut problems = Vec::new();
        let mut truncated = false;
        for y in &self.y_columns {
            let prepared = validate_chart_requirements(ds, x, y)
                .and_then(|()| prepare_chart_data(ds, x, y, self.chart_kind));
            match prepared {
                Ok(mut series) => {
                    truncated |= series.truncate(self.max_chart_points);
                    self.chart_series.push(series);
                }
                Err(e) => {
                    log::warn!("Chart {y} vs {x_label} not drawn: {e}");
                    problems.push(format!("{y}: {e}"));
                }
            }
        }

        let points: usize = self.chart_series.iter().map(ChartSeries::len).sum();
        log::info!(
            "Chart {} of {:?} vs {x_label}: {points} points in {:.3}s",
            self.chart_kind,
            self.y_columns,
            start.elapsed().as_secs_f64()
        );

        if truncated {
            problems.push(format!("showing the first {} points", self.max_chart_points));
        }
        if !problems.is_empty() {
            self.chart_message = Some(problems.join("; "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &[u8] = b"name,age,joined
Alice,30,2024-03-01
bob,,2024-01-01
Carol,25,2024-02-01
";

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.load_bytes("people.csv", PEOPLE).unwrap();
        state
    }

    #[test]
    fn loading_resets_derived_state() {
        let state = loaded();
        assert_eq!(state.file_name.as_deref(), Some("people.csv"));
        assert_eq!(state.detected, Some((',', "UTF-8")));
        assert_eq!(state.visible_rows, vec![0, 1, 2]);
        assert_eq!(state.stat_columns, vec!["age"]);
        assert_eq!(state.stats.len(), 1);
        assert_eq!(state.x_column.as_deref(), Some("name"));
        assert_eq!(state.y_columns, vec!["age"]);
        assert_eq!(state.chart_series.len(), 1);
        assert_eq!(state.chart_series[0].len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        assert!(state.load_bytes("broken.csv", b"a,b\n1,2,3\n").is_err());
        assert_eq!(state.file_name.as_deref(), Some("people.csv"));
        assert!(state.dataset.is_some());
    }

    #[test]
    fn search_and_row_cap() {
        let mut state = loaded();
        state.set_search_text("BO".into());
        assert_eq!(state.visible_rows, vec![1]);

        state.set_search_text(String::new());
        state.max_display_rows = 2;
        assert_eq!(state.displayed_rows(), &[0, 1]);
    }

    #[test]
    fn date_x_is_sorted() {
        let mut state = loaded();
        state.set_x_column(Some("joined".into()));
        let series = &state.chart_series[0];
        assert!(series.date_sorted);
        assert_eq!(series.y, vec![25.0, 30.0]);
    }

    #[test]
    fn row_index_x() {
        let mut state = loaded();
        state.set_x_column(None);
        assert_eq!(state.chart_message, None);
        let series = &state.chart_series[0];
        assert_eq!(series.x_column, None);
        assert_eq!(series.y, vec![30.0, 25.0]);
        assert_eq!(series.x_position(1), 2.0);
    }

    #[test]
    fn chart_problems_are_reported() {
        let mut state = loaded();
        state.toggle_y_column("name");
        assert_eq!(state.chart_series.len(), 1);
        let msg = state.chart_message.clone().unwrap();
        assert!(msg.contains("column 'name' is not numeric"), "{msg}");

        state.max_chart_points = 1;
        state.rebuild_chart();
        assert!(state.chart_message.unwrap().contains("first 1 points"));
    }

    #[test]
    fn stat_columns_follow_dataset_order() {
        let mut state = AppState::default();
        state
            .load_bytes("n.csv", b"a,b,c\n1,2,3\n4,5,6\n")
            .unwrap();
        state.toggle_stat_column("b");
        assert_eq!(state.stat_columns, vec!["a", "c"]);
        state.toggle_stat_column("b");
        assert_eq!(state.stat_columns, vec!["a", "b", "c"]);
        assert_eq!(state.stats.len(), 3);
    }
}
