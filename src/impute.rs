//! Median imputation for numeric columns.

use log::{debug, info, warn};

use crate::{
    data::Value,
    error::{CleanError, Result},
    frame::{ColumnKind, Table},
};

/// What to do when a column has no values to take a median of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllMissingPolicy {
    /// Leave the column missing; the median itself is missing.
    #[default]
    KeepMissing,
    /// Report a `Compute` error.
    Fail,
}

/// Names of every numeric column, in table order.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .map(|c| c.name.clone())
        .collect()
}

/// Median of the values, or `None` when there are none.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn fill_numeric_nans(table: Table, numeric_columns: &[String]) -> Result<Table> {
    fill_numeric_nans_with(table, numeric_columns, AllMissingPolicy::default())
}

pub fn fill_numeric_nans_with(
    mut table: Table,
    numeric_columns: &[String],
    policy: AllMissingPolicy,
) -> Result<Table> {
    for name in numeric_columns {
        let Some(column) = table.column_mut(name) else {
            debug!("Skipping imputation for absent column '{name}'");
            continue;
        };
        if column.kind != ColumnKind::Numeric {
            return Err(CleanError::Compute {
                column: name.clone(),
                aggregate: "median",
                reason: "column holds text values".to_string(),
            });
        }

        let missing = column.missing_count();
        let Some(fill) = median(&column.numbers()) else {
            match policy {
                AllMissingPolicy::KeepMissing => {
                    warn!("Column '{name}' has no values; leaving {missing} cell(s) missing");
                    continue;
                }
                AllMissingPolicy::Fail => {
                    return Err(CleanError::Compute {
                        column: name.clone(),
                        aggregate: "median",
                        reason: "column has no non-missing values".to_string(),
                    });
                }
            }
        };

        if missing == 0 {
            continue;
        }
        for cell in column.cells.iter_mut().filter(|c| c.is_none()) {
            *cell = Some(Value::Number(fill));
        }
        info!("Column '{name}': filled {missing} missing value(s) with median {fill}");
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    #[test]
    fn median_handles_odd_and_even_counts() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn text_columns_cannot_be_imputed() {
        let table = Table::new(vec![Column::text("name", &[Some("a"), None])]).unwrap();
        let err = fill_numeric_nans(table, &["name".to_string()]).unwrap_err();
        assert_eq!(err.kind(), "ComputeError");
    }
}
