use std::fmt;

use crate::error::{DataError, DataResult};

/// Tokens read as a missing value, matched after trimming surrounding
/// whitespace.  The empty string is included.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A typed table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

// -- Manual Eq/Ord so we can count unique values with a BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Number(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Number(v) => v.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Missing => {}
        }
    }
}

/// The string form used for display and text search.  Integral numbers print
/// without a fractional part, missing cells print as nothing.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Missing, Into::into)
    }
}

impl CellValue {
    /// Classify a raw CSV field.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_TOKENS.contains(&trimmed) {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            // `f64` also accepts NaN spellings outside the token list.
            Ok(v) if v.is_nan() => CellValue::Missing,
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Broad classification of a column's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKind {
    Numeric,
    Text,
    /// Numbers and text in the same column.
    Mixed,
    /// Only missing values.
    Empty,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Mixed => "mixed",
            ColumnKind::Empty => "empty",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// True when every cell is a number or missing.
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| matches!(v, CellValue::Number(_) | CellValue::Missing))
    }

    pub fn kind(&self) -> ColumnKind {
        let has_number = self.values.iter().any(|v| matches!(v, CellValue::Number(_)));
        let has_text = self.values.iter().any(|v| matches!(v, CellValue::Text(_)));
        match (has_number, has_text) {
            (true, true) => ColumnKind::Mixed,
            (true, false) => ColumnKind::Numeric,
            (false, true) => ColumnKind::Text,
            (false, false) => ColumnKind::Empty,
        }
    }

    /// Non-missing numeric values, in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, checking that column lengths agree and names are unique.
    pub fn new(columns: Vec<Column>) -> DataResult<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(DataError::Validation(format!(
                    "column '{}' has {} values, expected {expected}",
                    bad.name,
                    bad.values.len()
                )));
            }
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(DataError::Validation(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        Ok(Dataset { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col)?.values.get(row)
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.n_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// A copy holding only the given rows, in the given order.  Out-of-range
    /// indices are skipped.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let n_rows = self.n_rows();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: indices
                    .iter()
                    .filter(|&&i| i < n_rows)
                    .map(|&i| c.values[i].clone())
                    .collect(),
            })
            .collect();
        Dataset { columns }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Dataset {
        let indices: Vec<usize> = (0..self.n_rows().min(n)).collect();
        self.select_rows(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_raw_fields() {
        assert_eq!(CellValue::from_raw("30"), CellValue::Number(30.0));
        assert_eq!(CellValue::from_raw(" 2.5 "), CellValue::Number(2.5));
        assert_eq!(CellValue::from_raw(""), CellValue::Missing);
        assert_eq!(CellValue::from_raw("NA"), CellValue::Missing);
        assert_eq!(CellValue::from_raw("  null "), CellValue::Missing);
        assert_eq!(CellValue::from_raw("Alice"), CellValue::from("Alice"));
        assert_eq!(CellValue::from_raw(" bob "), CellValue::from(" bob "));
        assert_eq!(CellValue::from_raw("NAN"), CellValue::Missing);
        assert_eq!(CellValue::from_raw("+nan"), CellValue::Missing);
        assert_eq!(CellValue::from_raw("inf"), CellValue::Number(f64::INFINITY));
    }

    #[test]
    fn display_matches_search_form() {
        assert_eq!(CellValue::Number(30.0).to_string(), "30");
        assert_eq!(CellValue::Number(-4.0).to_string(), "-4");
        assert_eq!(CellValue::Number(27.5).to_string(), "27.5");
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(CellValue::from("bob").to_string(), "bob");
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Dataset::new(vec![
            Column::new("a", vec![1.0.into(), 2.0.into()]),
            Column::new("b", vec![1.0.into()]),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Dataset::new(vec![
            Column::new("a", vec![1.0.into()]),
            Column::new("a", vec![2.0.into()]),
        ])
        .unwrap_err();
        assert_eq!(err, DataError::Validation("duplicate column name 'a'".into()));
    }

    #[test]
    fn select_rows_keeps_column_order() {
        let ds = Dataset::new(vec![
            Column::new("x", vec!["a".into(), "b".into(), "c".into()]),
            Column::new("y", vec![1.0.into(), CellValue::Missing, 3.0.into()]),
        ])
        .unwrap();

        let picked = ds.select_rows(&[2, 0, 9]);
        assert_eq!(picked.column_names(), vec!["x", "y"]);
        assert_eq!(picked.n_rows(), 2);
        assert_eq!(picked.row(0).unwrap(), vec![&CellValue::from("c"), &CellValue::Number(3.0)]);
        assert_eq!(ds.head(1).n_rows(), 1);
        assert!(Dataset::default().is_empty());
    }

    #[test]
    fn column_kinds() {
        let mixed = Column::new("m", vec![1.0.into(), "x".into()]);
        let empty = Column::new("e", vec![CellValue::Missing]);
        assert_eq!(mixed.kind(), ColumnKind::Mixed);
        assert!(!mixed.is_numeric());
        assert_eq!(empty.kind(), ColumnKind::Empty);
        assert!(empty.is_numeric());
    }
}
