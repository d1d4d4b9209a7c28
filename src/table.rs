//! Plain-text rendering of a table head, with the row index as the first
//! column. Numeric columns are right-aligned, text columns left-aligned.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::{
    data::display_cell,
    frame::{ColumnKind, Table},
};

const MISSING_MARKER: &str = "NaN";

struct RenderColumn {
    header: String,
    cells: Vec<String>,
    right_align: bool,
}

impl RenderColumn {
    fn width(&self) -> usize {
        self.cells
            .iter()
            .chain(std::iter::once(&self.header))
            .map(|s| display_width(s))
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

pub fn render_head(table: &Table, rows: usize) -> String {
    let head = table.head(rows);
    let mut columns = Vec::with_capacity(head.column_count() + 1);
    columns.push(RenderColumn {
        header: String::new(),
        cells: head.index().iter().map(usize::to_string).collect(),
        right_align: false,
    });
    for column in head.columns() {
        columns.push(RenderColumn {
            header: column.name.clone(),
            cells: column
                .cells
                .iter()
                .map(|cell| match cell {
                    None => MISSING_MARKER.to_string(),
                    Some(_) => sanitize_cell(&display_cell(cell)),
                })
                .collect(),
            right_align: column.kind == ColumnKind::Numeric,
        });
    }

    let widths = columns.iter().map(RenderColumn::width).collect_vec();
    let mut output = String::new();
    let header_line = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(&c.header, *w, c.right_align))
        .join("  ");
    let _ = writeln!(output, "{}", header_line.trim_end());

    for row in 0..head.row_count() {
        let line = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&c.cells[row], *w, c.right_align))
            .join("  ");
        let _ = writeln!(output, "{}", line.trim_end());
    }
    let _ = writeln!(
        output,
        "\n[{} rows x {} columns]",
        table.row_count(),
        table.column_count()
    );
    output
}

pub fn print_head(table: &Table, rows: usize) {
    print!("{}", render_head(table, rows));
}

/// Renders `rows` under `headers` with left-aligned, two-space separated cells.
pub fn render_rows(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = (0..headers.len())
        .map(|idx| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .chain(std::iter::once(&headers[idx]))
                .map(|s| display_width(s))
                .max()
                .unwrap_or(1)
        })
        .collect_vec();
    let mut output = String::new();
    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(&sanitize_cell(cell), *w, false))
            .join("  ")
            .trim_end()
            .to_string()
    };
    let _ = writeln!(output, "{}", format_line(headers));
    let separator = widths.iter().map(|w| "-".repeat((*w).max(3))).collect_vec();
    let _ = writeln!(output, "{}", format_line(separator.as_slice()));
    for row in rows {
        let _ = writeln!(output, "{}", format_line(row.as_slice()));
    }
    output
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let padding = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{padding}{value}")
    } else {
        format!("{value}{padding}")
    }
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> String {
    value.replace(['\n', '\r', '\t'], " ")
}
