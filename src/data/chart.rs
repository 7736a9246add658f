use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{CellValue, Column, Dataset};
use super::stats::ColumnStats;

use crate::error::{DataError, DataResult};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a date or datetime written in one of the common layouts.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => f.write_str("line"),
            ChartKind::Bar => f.write_str("bar"),
        }
    }
}

/// One X value of a series.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartX {
    Date(NaiveDateTime),
    Number(f64),
    /// Categorical text; plotted at its position in the series.
    Label(String),
}

impl fmt::Display for ChartX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartX::Date(dt) => write!(f, "{dt}"),
            ChartX::Number(v) => write!(f, "{}", CellValue::Number(*v)),
            ChartX::Label(s) => write!(f, "{s}"),
        }
    }
}

/// Paired X/Y values ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    /// `None` when X is the row index.
    pub x_column: Option<String>,
    pub y_column: String,
    pub x: Vec<ChartX>,
    pub y: Vec<f64>,
    /// X parsed as dates and the pairs were put in chronological order.
    pub date_sorted: bool,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Numeric position of point `i` on the X axis.  Dates map to Unix
    /// seconds, labels to their index.
    pub fn x_position(&self, i: usize) -> f64 {
        match &self.x[i] {
            ChartX::Date(dt) => dt.and_utc().timestamp() as f64,
            ChartX::Number(v) => *v,
            ChartX::Label(_) => i as f64,
        }
    }

    /// Keep at most `max_points` points.  Returns whether points were dropped.
    pub fn truncate(&mut self, max_points: usize) -> bool {
        if self.len() <= max_points {
            return false;
        }
        self.x.truncate(max_points);
        self.y.truncate(max_points);
        true
    }

    /// Statistics of the plotted Y values.
    pub fn y_summary(&self) -> ColumnStats {
        ColumnStats::compute(&self.y_column, &self.y)
    }
}

/// Extract `x` and `y` into a [`ChartSeries`].  `x = None` plots `y`
/// against the row index.
///
/// Rows where either value is missing are dropped.  When every remaining X
/// value is text that parses as a date, the pairs are sorted chronologically
/// (stable); otherwise row order is kept.
pub fn prepare_chart_data(
    dataset: &Dataset,
    x: Option<&str>,
    y: &str,
    kind: ChartKind,
) -> DataResult<ChartSeries> {
    let x_col = resolve_x(dataset, x)?;
    let y_col = dataset.column(y).ok_or_else(|| DataError::column_not_found(y))?;
    if !y_col.is_numeric() {
        return Err(DataError::column_not_numeric(y));
    }

    let Some(x_col) = x_col else {
        let (xs, ys): (Vec<_>, Vec<_>) = y_col
            .values
            .iter()
            .enumerate()
            .filter_map(|(row, yv)| yv.as_f64().map(|yv| (ChartX::Number(row as f64), yv)))
            .unzip();
        return Ok(ChartSeries {
            kind,
            x_column: None,
            y_column: y.to_string(),
            x: xs,
            y: ys,
            date_sorted: false,
        });
    };

    let pairs: Vec<(&CellValue, f64)> = x_col
        .values
        .iter()
        .zip(&y_col.values)
        .filter(|(xv, _)| !xv.is_missing())
        .filter_map(|(xv, yv)| yv.as_f64().map(|yv| (xv, yv)))
        .collect();

    let dates: Option<Vec<NaiveDateTime>> = if pairs.is_empty() {
        None
    } else {
        pairs
            .iter()
            .map(|(xv, _)| match xv {
                CellValue::Text(s) => parse_date(s),
                _ => None,
            })
            .collect()
    };

    let (xs, ys, date_sorted) = match dates {
        Some(dates) => {
            let mut dated: Vec<(NaiveDateTime, f64)> =
                dates.into_iter().zip(pairs.iter().map(|(_, yv)| *yv)).collect();
            dated.sort_by_key(|(dt, _)| *dt);
            let (xs, ys): (Vec<_>, Vec<_>) =
                dated.into_iter().map(|(dt, yv)| (ChartX::Date(dt), yv)).unzip();
            (xs, ys, true)
        }
        None => {
            // Any text makes the whole axis categorical.
            let numeric_x = pairs.iter().all(|(xv, _)| xv.as_f64().is_some());
            let (xs, ys): (Vec<_>, Vec<_>) = pairs
                .into_iter()
                .map(|(xv, yv)| match xv.as_f64() {
                    Some(v) if numeric_x => (ChartX::Number(v), yv),
                    _ => (ChartX::Label(xv.to_string()), yv),
                })
                .unzip();
            (xs, ys, false)
        }
    };

    Ok(ChartSeries {
        kind,
        x_column: Some(x_col.name.clone()),
        y_column: y.to_string(),
        x: xs,
        y: ys,
        date_sorted,
    })
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

fn resolve_x<'a>(dataset: &'a Dataset, x: Option<&str>) -> DataResult<Option<&'a Column>> {
    x.map(|name| dataset.column(name).ok_or_else(|| DataError::column_not_found(name)))
        .transpose()
}

/// Check that a chart of `y` against `x` (or the row index) can be drawn.
pub fn validate_chart_requirements(
    dataset: &Dataset,
    x: Option<&str>,
    y: &str,
) -> DataResult<()> {
    if dataset.is_empty() {
        return Err(DataError::Validation("dataset is empty".into()));
    }
    let x_col = resolve_x(dataset, x)?;
    let y_col = dataset.column(y).ok_or_else(|| DataError::column_not_found(y))?;
    if !y_col.is_numeric() {
        return Err(DataError::column_not_numeric(y));
    }

    let complete = match x_col {
        Some(x_col) => x_col
            .values
            .iter()
            .zip(&y_col.values)
            .any(|(xv, yv)| !xv.is_missing() && !yv.is_missing()),
        None => y_col.values.iter().any(|yv| !yv.is_missing()),
    };
    if !complete {
        return Err(DataError::Validation(
            "no rows left after removing missing values".into(),
        ));
    }
    Ok(())
}
