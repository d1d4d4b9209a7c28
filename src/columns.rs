//! Column label normalization.
//!
//! Labels are lowercased, spaces become underscores, and then every literal
//! `st` becomes `state`. The substitution matches anywhere in the label, so
//! `cost` becomes `costate` and `First Name` becomes `firstate_name`. An `st`
//! that already begins `state` is left alone, which keeps the rewrite stable
//! when applied to its own output.

use log::{debug, info};

use crate::frame::Table;

const NEEDLE: &str = "st";
const EXPANSION: &str = "state";

pub fn normalize_column_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace(' ', "_");
    expand_st(&lowered)
}

fn expand_st(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 8);
    let mut rest = label;
    while let Some(pos) = rest.find(NEEDLE) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let consumed = if tail.starts_with(EXPANSION) {
            EXPANSION.len()
        } else {
            NEEDLE.len()
        };
        out.push_str(EXPANSION);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

pub fn clean_column_names(mut table: Table) -> Table {
    let mut renamed = 0usize;
    for name in table.column_names_mut() {
        let normalized = normalize_column_name(name);
        if normalized != *name {
            debug!("Renaming column '{name}' -> '{normalized}'");
            *name = normalized;
            renamed += 1;
        }
    }
    info!(
        "Normalized column names ({renamed} of {} renamed)",
        table.column_count()
    );
    table
}
