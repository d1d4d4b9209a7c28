//! Error kinds surfaced by the cleaning pipeline.
//!
//! Every stage fails fast with one [`CleanError`]; nothing is retried and no
//! partially cleaned table is returned alongside an error.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = CleanError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CleanError {
    /// The input path is missing or cannot be read.
    #[error("failed to read {path:?}: {source}")]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a well-formed delimited file.
    #[error("malformed delimited data in {path:?}{}: {message}", line_suffix(.line))]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// A targeted column holds a value its rule cannot convert.
    #[error("column '{column}' row {row}: cannot convert '{value}' to a number")]
    ValueCoercion {
        column: String,
        row: usize,
        value: String,
    },

    /// A numeric aggregate could not be computed.
    #[error("cannot compute {aggregate} for column '{column}': {reason}")]
    Compute {
        column: String,
        aggregate: &'static str,
        reason: String,
    },

    /// A caller-supplied column or rule does not fit the table.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl CleanError {
    pub fn parse(path: impl Into<PathBuf>, line: Option<u64>, message: impl Into<String>) -> Self {
        CleanError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CleanError::Configuration {
            message: message.into(),
        }
    }

    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CleanError::DataAccess { .. } => "DataAccessError",
            CleanError::Parse { .. } => "ParseError",
            CleanError::ValueCoercion { .. } => "ValueCoercionError",
            CleanError::Compute { .. } => "ComputeError",
            CleanError::Configuration { .. } => "ConfigurationError",
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_mentions_line_when_known() {
        let err = CleanError::parse("data.csv", Some(4), "found 3 fields, expected 2");
        let rendered = err.to_string();
        assert!(rendered.contains("at line 4"), "{rendered}");
        assert_eq!(err.kind(), "ParseError");

        let without = CleanError::parse("data.csv", None, "unterminated quoted field");
        assert!(!without.to_string().contains("at line"));
    }
}
