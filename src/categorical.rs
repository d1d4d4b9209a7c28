//! Canonicalizes categorical values and coerces percent-style text columns
//! to numbers.
//!
//! Targeted columns absent from the table are skipped. Replacement only
//! touches present text cells; numeric and missing cells pass through.

use std::borrow::Cow;

use log::{debug, info};

use crate::{
    data::{Cell, Value, number_cell, parse_number},
    error::{CleanError, Result},
    frame::{ColumnKind, Table},
    rules::{CleaningRules, ColumnRule, NumericCoercion},
};

/// Applies the built-in rule set.
pub fn clean_categorical(table: Table) -> Result<Table> {
    apply_rules(table, &CleaningRules::default())
}

pub fn apply_rules(mut table: Table, rules: &CleaningRules) -> Result<Table> {
    for rule in &rules.replacements {
        apply_replacements(&mut table, rule);
    }
    for coercion in &rules.coercions {
        apply_coercion(&mut table, coercion)?;
    }
    Ok(table)
}

/// Returns the number of cells rewritten.
pub fn apply_replacements(table: &mut Table, rule: &ColumnRule) -> usize {
    let Some(column) = table.column_mut(&rule.column) else {
        debug!("Skipping replacements for absent column '{}'", rule.column);
        return 0;
    };
    let mut changed = 0usize;
    for cell in &mut column.cells {
        if let Some(Value::Text(text)) = cell {
            let replacement = match rule.normalize_value(text) {
                Cow::Owned(normalized) if normalized != *text => Some(normalized),
                _ => None,
            };
            if let Some(normalized) = replacement {
                *text = normalized;
                changed += 1;
            }
        }
    }
    info!(
        "Column '{}': replaced {changed} value(s) using {} mapping(s)",
        rule.column,
        rule.replace.len()
    );
    changed
}

/// Strips the configured characters from every cell's text form and parses
/// the result as a float. Missing cells stay missing, as does text that
/// parses to NaN.
pub fn apply_coercion(table: &mut Table, coercion: &NumericCoercion) -> Result<()> {
    let Some(column) = table.column(&coercion.column) else {
        debug!("Skipping numeric coercion for absent column '{}'", coercion.column);
        return Ok(());
    };

    let cells = column
        .cells
        .iter()
        .zip(table.index())
        .map(|(cell, &row)| coerce_cell(cell, coercion, row))
        .collect::<Result<Vec<Cell>>>()?;

    if let Some(column) = table.column_mut(&coercion.column) {
        column.cells = cells;
        column.kind = ColumnKind::Numeric;
        info!(
            "Column '{}': coerced to numeric after stripping {:?} ({} missing)",
            coercion.column,
            coercion.strip,
            column.missing_count()
        );
    }
    Ok(())
}

fn coerce_cell(cell: &Cell, coercion: &NumericCoercion, row: usize) -> Result<Cell> {
    match cell {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(number_cell(*n)),
        Some(Value::Text(text)) => {
            let stripped: String = text
                .chars()
                .filter(|c| !coercion.strip.contains(*c))
                .collect();
            parse_number(&stripped)
                .map(number_cell)
                .ok_or_else(|| CleanError::ValueCoercion {
                    column: coercion.column.clone(),
                    row,
                    value: text.clone(),
                })
        }
    }
}
