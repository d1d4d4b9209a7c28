//! First-occurrence duplicate row removal.

use std::collections::HashSet;

use log::info;

use crate::{
    error::{CleanError, Result},
    frame::Table,
};

/// Drops every row whose values over `subset` (all columns when `None`)
/// repeat an earlier row, then renumbers the row index from zero.
pub fn remove_duplicates(mut table: Table, subset: Option<&[String]>) -> Result<Table> {
    let positions = resolve_subset(&table, subset)?;

    let mut seen = HashSet::with_capacity(table.row_count());
    let keep = (0..table.row_count())
        .map(|row| seen.insert(table.row_key(row, &positions)))
        .collect::<Vec<_>>();
    let dropped = keep.iter().filter(|k| !**k).count();

    table.retain_rows(&keep);
    table.reset_index();
    info!(
        "Removed {dropped} duplicate row(s); {} row(s) remain",
        table.row_count()
    );
    Ok(table)
}

fn resolve_subset(table: &Table, subset: Option<&[String]>) -> Result<Vec<usize>> {
    match subset {
        None => Ok((0..table.column_count()).collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                table.column_index(name).ok_or_else(|| {
                    CleanError::configuration(format!(
                        "duplicate subset column '{name}' not found in table"
                    ))
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    #[test]
    fn missing_cells_compare_equal() {
        let table = Table::new(vec![
            Column::text("a", &[None, Some("x"), None]),
            Column::numeric("b", &[Some(1.0), Some(1.0), Some(1.0)]),
        ])
        .unwrap();
        let deduped = remove_duplicates(table, None).unwrap();
        assert_eq!(deduped.row_count(), 2);
        assert_eq!(deduped.index(), &[0, 1]);
    }

    #[test]
    fn unknown_subset_column_is_configuration_error() {
        let table = Table::new(vec![Column::numeric("b", &[Some(1.0)])]).unwrap();
        let err = remove_duplicates(table, Some(&["zzz".to_string()])).unwrap_err();
        assert_eq!(err.kind(), "ConfigurationError");
    }
}
