//! Reads a delimited file into a [`Table`], inferring each column's kind.
//!
//! A column becomes [`ColumnKind::Numeric`] when every non-missing field
//! parses as a float; otherwise it stays text. Header names are kept exactly
//! as written apart from filling blanks and disambiguating repeats.

use std::{collections::HashSet, path::Path};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use crate::{
    data::{Cell, Value, number_cell, parse_number},
    error::{CleanError, Result},
    frame::{Column, ColumnKind, Table},
    io_utils,
};

/// Field spellings read as missing in addition to the empty field.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit delimiter; resolved from the file extension when `None`.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
    pub na_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadOptions {
    fn is_missing(&self, field: &str) -> bool {
        field.is_empty() || self.na_values.iter().any(|na| na == field)
    }
}

#[derive(Debug, Clone)]
struct TypeCandidate {
    possible_numeric: bool,
}

impl TypeCandidate {
    fn new() -> Self {
        Self {
            possible_numeric: true,
        }
    }

    fn observe(&mut self, field: &str) {
        if self.possible_numeric && parse_number(field).is_none() {
            self.possible_numeric = false;
        }
    }

    fn decide(&self) -> ColumnKind {
        if self.possible_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

/// Loads `path` with the default options.
pub fn load_data(path: &Path) -> Result<Table> {
    load_with_options(path, &LoadOptions::default())
}

pub fn load_with_options(path: &Path, options: &LoadOptions) -> Result<Table> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    info!(
        "Loading '{}' with delimiter '{}'",
        path.display(),
        crate::printable_delimiter(delimiter)
    );
    let bytes = io_utils::read_input_bytes(path)?;
    parse_table(path, &bytes, delimiter, options)
}

fn parse_table(path: &Path, bytes: &[u8], delimiter: u8, options: &LoadOptions) -> Result<Table> {
    if has_unterminated_quote(bytes, delimiter) {
        return Err(CleanError::parse(path, None, "unterminated quoted field"));
    }

    let mut reader = io_utils::open_csv_reader(bytes, delimiter, true);
    let header_record = reader
        .byte_headers()
        .map_err(|err| csv_error(path, &err))?
        .clone();
    if header_record.is_empty() {
        return Err(CleanError::parse(path, Some(1), "no header row found"));
    }
    let raw_headers = io_utils::decode_record(&header_record, options.encoding)
        .map_err(|message| CleanError::parse(path, Some(1), message))?;
    let headers = disambiguate_headers(raw_headers);

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut candidates = vec![TypeCandidate::new(); headers.len()];

    for record in reader.byte_records() {
        let record = record.map_err(|err| csv_error(path, &err))?;
        let line = record.position().map(|p| p.line());
        let decoded = io_utils::decode_record(&record, options.encoding)
            .map_err(|message| CleanError::parse(path, line, message))?;
        for (idx, field) in decoded.into_iter().enumerate() {
            let cell = if options.is_missing(&field) {
                None
            } else {
                candidates[idx].observe(&field);
                Some(field)
            };
            raw_columns[idx].push(cell);
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .zip(candidates)
        .map(|((name, raw), candidate)| {
            let kind = candidate.decide();
            debug!("Column '{name}' inferred as {}", kind.as_str());
            Column::new(name, kind, typed_cells(raw, kind))
        })
        .collect::<Vec<_>>();

    let table = Table::new(columns)?;
    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.column_count(),
        path
    );
    Ok(table)
}

/// Reports whether a field that opened with a quote runs to end of input.
/// A quote only opens a field when it is the field's first byte; inside a
/// quoted field `""` is an escaped quote.
fn has_unterminated_quote(bytes: &[u8], delimiter: u8) -> bool {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut iter = bytes.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if in_quotes {
            if byte == b'"' {
                if iter.peek() == Some(&b'"') {
                    iter.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        if byte == delimiter || byte == b'\n' || byte == b'\r' {
            at_field_start = true;
        } else {
            in_quotes = at_field_start && byte == b'"';
            at_field_start = false;
        }
    }
    in_quotes
}

fn typed_cells(raw: Vec<Option<String>>, kind: ColumnKind) -> Vec<Cell> {
    raw.into_iter()
        .map(|field| match (field, kind) {
            (None, _) => None,
            (Some(text), ColumnKind::Text) => Some(Value::Text(text)),
            (Some(text), ColumnKind::Numeric) => parse_number(&text).and_then(number_cell),
        })
        .collect()
}

/// Names blank headers `Unnamed: <pos>` and suffixes repeats with `.1`, `.2`, ...
fn disambiguate_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let base = if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}.{suffix}");
                suffix += 1;
            }
            candidate
        })
        .collect()
}

fn csv_error(path: &Path, err: &csv::Error) -> CleanError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => CleanError::parse(
            path,
            pos.as_ref().map(|p| p.line()),
            format!("found {len} field(s), expected {expected_len}"),
        ),
        _ => CleanError::parse(path, err.position().map(|p| p.line()), err.to_string()),
    }
}
