//! Runs the cleaning stages in order over one input file.
//!
//! load -> column names -> categorical rules -> median imputation ->
//! duplicate removal. The first failing stage aborts the run and its error
//! is returned unchanged.

use std::path::Path;

use anyhow::Context;
use log::{debug, info};

use crate::{
    categorical, columns, dedup,
    data::display_cell,
    error::Result,
    frame::Table,
    impute::{self, AllMissingPolicy},
    io_utils,
    loader::{self, LoadOptions},
    rules::CleaningRules,
};

#[derive(Debug, Clone, Default)]
pub struct CleanPipeline {
    pub load: LoadOptions,
    pub rules: CleaningRules,
    /// Columns defining row equality; every column when `None`.
    pub dedup_subset: Option<Vec<String>>,
    pub all_missing: AllMissingPolicy,
}

impl CleanPipeline {
    pub fn run(&self, path: &Path) -> Result<Table> {
        let table = loader::load_with_options(path, &self.load)?;
        let table = columns::clean_column_names(table);
        let table = categorical::apply_rules(table, &self.rules)?;

        let numeric = impute::numeric_columns(&table);
        debug!("Numeric columns for imputation: {numeric:?}");
        let table = impute::fill_numeric_nans_with(table, &numeric, self.all_missing)?;

        let table = dedup::remove_duplicates(table, self.dedup_subset.as_deref())?;
        info!(
            "Cleaned {:?}: {} row(s) x {} column(s)",
            path,
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }
}

/// Cleans comma-separated `path` with the built-in rules. The file extension
/// is not consulted; use [`CleanPipeline`] for other delimiters.
pub fn clean_file(path: &Path) -> Result<Table> {
    let pipeline = CleanPipeline {
        load: LoadOptions {
            delimiter: Some(io_utils::DEFAULT_CSV_DELIMITER),
            ..LoadOptions::default()
        },
        ..CleanPipeline::default()
    };
    pipeline.run(path)
}

/// Writes the table as delimited text with a header row. Missing cells are
/// written as empty fields.
pub fn write_table(table: &Table, output: Option<&Path>, delimiter: u8) -> anyhow::Result<()> {
    let mut writer = io_utils::open_csv_writer(output, delimiter)?;
    writer
        .write_record(table.headers())
        .context("Writing output headers")?;
    for position in 0..table.row_count() {
        let record = table
            .row(position)
            .into_iter()
            .map(display_cell)
            .collect::<Vec<_>>();
        writer
            .write_record(&record)
            .with_context(|| format!("Writing output row {}", position + 2))?;
    }
    writer.flush().context("Flushing output writer")?;
    Ok(())
}
