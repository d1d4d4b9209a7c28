//! In-memory column store threaded through the cleaning stages.
//!
//! A [`Table`] owns an ordered list of [`Column`]s that all share one row
//! count, plus a row index of labels. Stages take the table by value, mutate
//! it in place and hand it on; nothing else keeps a reference to it.

use itertools::Itertools;

use crate::{
    data::{Cell, CellKey, Value},
    error::{CleanError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Numeric => "numeric",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn text<S: AsRef<str>>(name: &str, values: &[Option<S>]) -> Self {
        let cells = values
            .iter()
            .map(|v| v.as_ref().map(|s| Value::Text(s.as_ref().to_string())))
            .collect();
        Self::new(name, ColumnKind::Text, cells)
    }

    pub fn numeric(name: &str, values: &[Option<f64>]) -> Self {
        let cells = values
            .iter()
            .map(|v| v.and_then(crate::data::number_cell))
            .collect();
        Self::new(name, ColumnKind::Numeric, cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Non-missing numeric values in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.cells
            .iter()
            .filter_map(|c| c.as_ref().and_then(Value::as_number))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    index: Vec<usize>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|c| c.len() != rows) {
            return Err(CleanError::configuration(format!(
                "column '{}' has {} row(s) but the table has {rows}",
                ragged.name,
                ragged.len()
            )));
        }
        Ok(Self {
            columns,
            index: (0..rows).collect(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn column_names_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.columns.iter_mut().map(|c| &mut c.name)
    }

    pub fn row(&self, position: usize) -> Vec<&Cell> {
        self.columns
            .iter()
            .filter_map(|c| c.cells.get(position))
            .collect()
    }

    /// Builds the comparison key of one row over the given column positions.
    pub fn row_key(&self, position: usize, columns: &[usize]) -> Vec<CellKey> {
        columns
            .iter()
            .filter_map(|&idx| self.columns.get(idx))
            .map(|c| c.cells.get(position).map_or(CellKey::Missing, CellKey::from))
            .collect()
    }

    /// Keeps the rows whose flag is `true`, preserving order and labels.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let mut flags = keep.iter().copied();
        self.index.retain(|_| flags.next().unwrap_or(true));
        for column in &mut self.columns {
            let mut flags = keep.iter().copied();
            column.cells.retain(|_| flags.next().unwrap_or(true));
        }
    }

    /// Renumbers row labels contiguously from zero.
    pub fn reset_index(&mut self) {
        self.index = (0..self.row_count()).collect();
    }

    /// First `rows` rows as a new table, keeping their labels.
    pub fn head(&self, rows: usize) -> Table {
        let take = rows.min(self.row_count());
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.kind, c.cells[..take].to_vec()))
                .collect_vec(),
            index: self.index[..take].to_vec(),
        }
    }
}
