use super::model::Dataset;

use crate::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// Numeric column detection
// ---------------------------------------------------------------------------

/// Names of columns holding only numbers or missing values, in column order.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| c.name.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Per-column statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics of one numeric column.  Missing values are ignored;
/// `None` marks a statistic that is undefined for the available values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub sum: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Sample standard deviation; needs at least two values.
    pub std: Option<f64>,
}

impl ColumnStats {
    pub fn compute(column: &str, values: &[f64]) -> Self {
        let count = values.len();
        let sum = values.iter().fold(0.0, |acc, v| acc + v);
        let mean = (count > 0).then(|| sum / count as f64);

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = match count {
            0 => None,
            n if n % 2 == 0 => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
            n => Some(sorted[n / 2]),
        };

        let std = match mean {
            Some(m) if count >= 2 => {
                let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
                Some((ss / (count - 1) as f64).sqrt())
            }
            _ => None,
        };

        ColumnStats {
            column: column.to_string(),
            count,
            sum,
            mean,
            median,
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            std,
        }
    }

    /// Statistic name → value, in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("sum", Some(self.sum)),
            ("median", self.median),
            ("min", self.min),
            ("max", self.max),
            ("std", self.std),
        ]
    }
}

/// Statistics for the requested columns, or for every numeric column when
/// `columns` is `None`.
pub fn column_statistics(
    dataset: &Dataset,
    columns: Option<&[String]>,
) -> DataResult<Vec<ColumnStats>> {
    let targets = match columns {
        Some(cols) => cols.to_vec(),
        None => numeric_columns(dataset),
    };

    targets
        .iter()
        .map(|name| {
            let col = dataset
                .column(name)
                .ok_or_else(|| DataError::column_not_found(name))?;
            if !col.is_numeric() {
                return Err(DataError::column_not_numeric(name));
            }
            Ok(ColumnStats::compute(name, &col.numbers()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary across columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    pub columns: usize,
    pub total_values: usize,
    pub total_sum: f64,
    /// Mean of the per-column means that are defined.
    pub overall_mean: Option<f64>,
}

pub fn summarize(stats: &[ColumnStats]) -> StatsSummary {
    let means: Vec<f64> = stats.iter().filter_map(|s| s.mean).collect();
    StatsSummary {
        columns: stats.len(),
        total_values: stats.iter().map(|s| s.count).sum(),
        total_sum: stats.iter().fold(0.0, |acc, s| acc + s.sum),
        overall_mean: (!means.is_empty()).then(|| means.iter().sum::<f64>() / means.len() as f64),
    }
}
