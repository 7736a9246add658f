use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use super::model::{CellValue, Column, Dataset};

use crate::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Separators and encodings tried, in priority order.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub separators: Vec<u8>,
    pub encodings: Vec<&'static Encoding>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separators: vec![b',', b';', b'\t'],
            // WHATWG maps the "latin1" label to windows-1252.
            encodings: vec![UTF_8, WINDOWS_1252],
        }
    }
}

/// Resolve an encoding label such as `utf-8`, `latin1` or `iso-8859-1`.
pub fn encoding_for_label(label: &str) -> DataResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DataError::Encoding(format!("unknown encoding '{label}'")))
}

/// A parsed file plus what was detected while reading it.
#[derive(Debug, Clone)]
pub struct LoadedCsv {
    pub dataset: Dataset,
    pub separator: u8,
    pub encoding: &'static Encoding,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse CSV bytes into a [`Dataset`].
///
/// The hints, when given, are tried before the configured candidates.
/// The first row is the header.
pub fn load_csv(
    bytes: &[u8],
    separator_hint: Option<u8>,
    encoding_hint: Option<&str>,
    options: &LoadOptions,
) -> DataResult<LoadedCsv> {
    let mut encodings: Vec<&'static Encoding> = Vec::new();
    if let Some(label) = encoding_hint {
        encodings.push(encoding_for_label(label)?);
    }
    for enc in &options.encodings {
        if !encodings.contains(enc) {
            encodings.push(*enc);
        }
    }

    let (text, encoding) = decode(bytes, &encodings)?;

    let mut separators: Vec<u8> = separator_hint.into_iter().collect();
    for sep in &options.separators {
        if !separators.contains(sep) {
            separators.push(*sep);
        }
    }

    let (dataset, separator) = parse_with_separators(&text, &separators)?;
    Ok(LoadedCsv {
        dataset,
        separator,
        encoding,
    })
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode<'a>(
    bytes: &'a [u8],
    encodings: &[&'static Encoding],
) -> DataResult<(Cow<'a, str>, &'static Encoding)> {
    for &enc in encodings {
        let body = if enc == UTF_8 {
            bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
        } else {
            bytes
        };
        match enc.decode_without_bom_handling_and_without_replacement(body) {
            Some(text) => return Ok((text, enc)),
            None => log::debug!("bytes are not valid {}", enc.name()),
        }
    }
    let tried: Vec<&str> = encodings.iter().map(|e| e.name()).collect();
    Err(DataError::Encoding(format!(
        "no encoding could decode the bytes (tried {})",
        tried.join(", ")
    )))
}

// ---------------------------------------------------------------------------
// Separator detection
// ---------------------------------------------------------------------------

fn parse_with_separators(text: &str, separators: &[u8]) -> DataResult<(Dataset, u8)> {
    if text.trim().is_empty() {
        return Err(DataError::Parse("no columns to parse from file".into()));
    }

    // A single-column parse only counts when no candidate hit ragged rows.
    let mut single_column: Option<(Dataset, u8)> = None;
    let mut structural_error: Option<String> = None;

    for &sep in separators {
        match parse_table(text, sep) {
            Ok(ds) if ds.n_cols() > 1 => return Ok((ds, sep)),
            Ok(ds) => {
                log::debug!("separator {:?} yields a single column", sep as char);
                if single_column.is_none() {
                    single_column = Some((ds, sep));
                }
            }
            Err(e) => {
                log::debug!("separator {:?} rejected: {e}", sep as char);
                structural_error.get_or_insert(e);
            }
        }
    }

    match (structural_error, single_column) {
        (Some(e), _) => Err(DataError::Parse(e)),
        (None, Some(found)) => Ok(found),
        (None, None) => Err(DataError::Parse("no separator candidates".into())),
    }
}

/// Strict parse: every record must have as many fields as the header.
fn parse_table(text: &str, separator: u8) -> Result<Dataset, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() {
        return Err("no columns to parse from file".into());
    }

    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("row {}: {e}", row_no + 1))?;
        for (col_idx, field) in record.iter().enumerate() {
            values[col_idx].push(CellValue::from_raw(field));
        }
    }

    let columns = unique_names(&headers)
        .into_iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect();
    Dataset::new(columns).map_err(|e| e.to_string())
}

/// Blank names become `Unnamed: {i}`, repeats get `.1`, `.2`, … suffixes.
fn unique_names(headers: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    for (i, raw) in headers.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            raw.clone()
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::matching_rows;
    use crate::data::stats::column_statistics;

    fn load(bytes: &[u8]) -> DataResult<LoadedCsv> {
        load_csv(bytes, None, None, &LoadOptions::default())
    }

    #[test]
    fn loads_comma_separated_utf8() {
        let loaded = load(b"name,age\nAlice,30\nbob,\nCarol,25\n").unwrap();
        assert_eq!(loaded.separator, b',');
        assert_eq!(loaded.encoding, UTF_8);

        let ds = loaded.dataset;
        assert_eq!(ds.column_names(), vec!["name", "age"]);
        assert_eq!(ds.n_rows(), 3);
        let age = ds.column("age").unwrap();
        assert_eq!(
            age.values,
            vec![CellValue::Number(30.0), CellValue::Missing, CellValue::Number(25.0)]
        );
    }

    #[test]
    fn detects_semicolon_with_decimal_commas() {
        let loaded = load(b"city;temp\nLisboa;21,5\nPorto;18,0\n").unwrap();
        assert_eq!(loaded.separator, b';');
        assert_eq!(loaded.dataset.column_names(), vec!["city", "temp"]);
        assert_eq!(loaded.dataset.cell(0, 1), Some(&CellValue::from("21,5")));
    }

    #[test]
    fn detects_tab() {
        let loaded = load(b"a\tb\n1\t2\n").unwrap();
        assert_eq!(loaded.separator, b'\t');
        assert_eq!(loaded.dataset.n_cols(), 2);
    }

    #[test]
    fn separator_hint_wins() {
        let loaded =
            load_csv(b"a;b,c\n1;2,3\n", Some(b';'), None, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.separator, b';');
        assert_eq!(loaded.dataset.column_names(), vec!["a", "b,c"]);
    }

    #[test]
    fn falls_back_to_latin1() {
        let loaded = load(b"nome,cidade\nJo\xe3o,S\xe3o Paulo\n").unwrap();
        assert_eq!(loaded.encoding, WINDOWS_1252);
        assert_eq!(loaded.dataset.cell(0, 0), Some(&CellValue::from("João")));
    }

    #[test]
    fn strips_utf8_bom() {
        let loaded = load(b"\xEF\xBB\xBFid,v\n1,2\n").unwrap();
        assert_eq!(loaded.dataset.column_names(), vec!["id", "v"]);
    }

    #[test]
    fn encoding_error_when_nothing_decodes() {
        let options = LoadOptions {
            separators: vec![b','],
            encodings: vec![UTF_8],
        };
        let err = load_csv(b"a,b\n\xff\xfe,1\n", None, None, &options).unwrap_err();
        assert!(matches!(err, DataError::Encoding(_)), "{err}");
    }

    #[test]
    fn unknown_encoding_hint() {
        let err = load_csv(b"a\n1\n", None, Some("klingon"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::Encoding(_)));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let err = load(b"a,b\n1,2,3\n4\n").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)), "{err}");
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(load(b""), Err(DataError::Parse(_))));
        assert!(matches!(load(b"  \n"), Err(DataError::Parse(_))));
    }

    #[test]
    fn single_column_file_is_accepted() {
        let loaded = load(b"value\n1\n2\n").unwrap();
        assert_eq!(loaded.separator, b',');
        assert_eq!(loaded.dataset.n_cols(), 1);
        assert_eq!(loaded.dataset.n_rows(), 2);
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        let ds = load(b"a,b\n").unwrap().dataset;
        assert_eq!(ds.n_cols(), 2);
        assert!(ds.is_empty());
    }

    #[test]
    fn nan_spellings_load_as_missing() {
        let ds = load(b"k,v\na,NAN\nb,1\nc,+nan\nd,3\n").unwrap().dataset;
        let v = ds.column("v").unwrap();
        assert_eq!(v.missing_count(), 2);
        assert!(v.is_numeric());

        let stats = column_statistics(&ds, None).unwrap();
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].sum, 4.0);
        assert_eq!(stats[0].mean, Some(2.0));
        assert_eq!(stats[0].max, Some(3.0));
        assert!(stats[0].std.is_some_and(|s| s.is_finite()));

        assert!(matching_rows(&ds, "nan").is_empty());
    }

    #[test]
    fn fixes_blank_and_duplicate_headers() {
        let ds = load(b"a,,a,a\n1,2,3,4\n").unwrap().dataset;
        assert_eq!(ds.column_names(), vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }
}
