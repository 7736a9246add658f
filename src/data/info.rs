use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Column, ColumnKind, Dataset};
use super::stats::numeric_columns;

/// Overview of a loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    /// Distinct non-missing values, summed over columns.
    pub unique_values: usize,
    pub missing_values: usize,
    pub numeric_columns: Vec<String>,
    pub text_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDetail {
    pub name: String,
    pub kind: ColumnKind,
    pub unique: usize,
    pub missing: usize,
}

fn unique_count(col: &Column) -> usize {
    col.values
        .iter()
        .filter(|v| !v.is_missing())
        .collect::<BTreeSet<&CellValue>>()
        .len()
}

pub fn dataset_info(dataset: &Dataset) -> DatasetInfo {
    let cols = dataset.columns();
    DatasetInfo {
        rows: dataset.n_rows(),
        columns: dataset.n_cols(),
        unique_values: cols.iter().map(unique_count).sum(),
        missing_values: cols.iter().map(Column::missing_count).sum(),
        numeric_columns: numeric_columns(dataset),
        text_columns: cols
            .iter()
            .filter(|c| c.kind() == ColumnKind::Text)
            .map(|c| c.name.clone())
            .collect(),
    }
}

pub fn column_details(dataset: &Dataset) -> Vec<ColumnDetail> {
    dataset
        .columns()
        .iter()
        .map(|c| ColumnDetail {
            name: c.name.clone(),
            kind: c.kind(),
            unique: unique_count(c),
            missing: c.missing_count(),
        })
        .collect()
}

/// How many columns of each kind.
pub fn type_distribution(dataset: &Dataset) -> BTreeMap<ColumnKind, usize> {
    let mut counts = BTreeMap::new();
    for col in dataset.columns() {
        *counts.entry(col.kind()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::new("name", vec!["Alice".into(), "bob".into(), "Alice".into()]),
            Column::new("age", vec![30.0.into(), CellValue::Missing, 30.0.into()]),
            Column::new("code", vec![1.0.into(), "A7".into(), CellValue::Missing]),
        ])
        .unwrap()
    }

    #[test]
    fn summarizes_dataset() {
        let info = dataset_info(&sample());
        assert_eq!(info.rows, 3);
        assert_eq!(info.columns, 3);
        assert_eq!(info.unique_values, 2 + 1 + 2);
        assert_eq!(info.missing_values, 2);
        assert_eq!(info.numeric_columns, vec!["age"]);
        assert_eq!(info.text_columns, vec!["name"]);
    }

    #[test]
    fn describes_columns() {
        let details = column_details(&sample());
        assert_eq!(
            details[2],
            ColumnDetail {
                name: "code".into(),
                kind: ColumnKind::Mixed,
                unique: 2,
                missing: 1,
            }
        );

        let dist = type_distribution(&sample());
        assert_eq!(dist.get(&ColumnKind::Text), Some(&1));
        assert_eq!(dist.get(&ColumnKind::Numeric), Some(&1));
        assert_eq!(dist.get(&ColumnKind::Mixed), Some(&1));
        assert_eq!(dist.get(&ColumnKind::Empty), None);
    }
}
