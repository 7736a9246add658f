use super::model::Dataset;

// ---------------------------------------------------------------------------
// Text search across all columns
// ---------------------------------------------------------------------------

/// Return indices of rows where the string form of any cell contains `term`,
/// ignoring case.
///
/// A blank term matches every row.  Missing cells have an empty string form
/// and therefore never match a non-blank term.
pub fn matching_rows(dataset: &Dataset, term: &str) -> Vec<usize> {
    if term.trim().is_empty() {
        return (0..dataset.n_rows()).collect();
    }
    let needle = term.to_lowercase();

    (0..dataset.n_rows())
        .filter(|&row| {
            dataset.columns().iter().any(|col| {
                col.values[row]
                    .to_string()
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .collect()
}

/// The rows of `dataset` matching `term` (see [`matching_rows`]).
pub fn filter_by_text(dataset: &Dataset, term: &str) -> Dataset {
    if term.trim().is_empty() {
        return dataset.clone();
    }
    dataset.select_rows(&matching_rows(dataset, term))
}

/// Keep at most `max_rows` rows.  The flag tells whether rows were cut.
pub fn limit_rows(dataset: &Dataset, max_rows: usize) -> (Dataset, bool) {
    if dataset.n_rows() > max_rows {
        (dataset.head(max_rows), true)
    } else {
        (dataset.clone(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn people() -> Dataset {
        Dataset::new(vec![
            Column::new("name", vec!["Alice".into(), "bob".into(), "Carol".into()]),
            Column::new("age", vec![30.0.into(), CellValue::Missing, 25.0.into()]),
        ])
        .unwrap()
    }

    fn row_contains(ds: &Dataset, row: usize, term: &str) -> bool {
        let needle = term.to_lowercase();
        ds.row(row)
            .unwrap()
            .iter()
            .any(|c| c.to_string().to_lowercase().contains(&needle))
    }

    #[test]
    fn finds_case_insensitive_substring() {
        let result = filter_by_text(&people(), "BO");
        assert_eq!(result.n_rows(), 1);
        assert_eq!(result.cell(0, 0), Some(&CellValue::from("bob")));
        assert_eq!(result.column_names(), vec!["name", "age"]);
    }

    #[test]
    fn matches_numbers_by_their_string_form() {
        assert_eq!(matching_rows(&people(), "25"), vec![2]);
        assert_eq!(matching_rows(&people(), "3"), vec![0]);
    }

    #[test]
    fn blank_term_is_identity() {
        let ds = people();
        assert_eq!(filter_by_text(&ds, ""), ds);
        assert_eq!(filter_by_text(&ds, "   "), ds);
    }

    #[test]
    fn empty_dataset_gives_empty_result() {
        let ds = Dataset::new(vec![Column::new("a", vec![])]).unwrap();
        let result = filter_by_text(&ds, "x");
        assert!(result.is_empty());
        assert_eq!(result.column_names(), vec!["a"]);
    }

    #[test]
    fn missing_cells_never_match() {
        assert!(matching_rows(&people(), "nan").is_empty());
    }

    #[test]
    fn result_is_sound_and_complete() {
        let ds = people();
        for term in ["a", "o", "l", "2", "zz", "CAR"] {
            let hits = matching_rows(&ds, term);
            for row in 0..ds.n_rows() {
                assert_eq!(
                    hits.contains(&row),
                    row_contains(&ds, row, term),
                    "term {term:?} row {row}"
                );
            }
        }
    }

    #[test]
    fn limits_rows() {
        let (head, cut) = limit_rows(&people(), 2);
        assert_eq!(head.n_rows(), 2);
        assert!(cut);

        let (all, cut) = limit_rows(&people(), 10);
        assert_eq!(all.n_rows(), 3);
        assert!(!cut);
    }
}
