use thiserror::Error;

/// Errors raised by the data layer.  Every variant carries a reason that is
/// shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The bytes do not form a consistent rectangular CSV table.
    #[error("could not parse CSV: {0}")]
    Parse(String),

    /// None of the tried encodings could decode the bytes.
    #[error("could not decode file: {0}")]
    Encoding(String),

    /// A precondition on the dataset or the requested columns is not met.
    #[error("{0}")]
    Validation(String),
}

impl DataError {
    pub fn column_not_found(name: &str) -> Self {
        DataError::Validation(format!("column '{name}' not found"))
    }

    pub fn column_not_numeric(name: &str) -> Self {
        DataError::Validation(format!("column '{name}' is not numeric"))
    }
}

pub type DataResult<T> = Result<T, DataError>;
