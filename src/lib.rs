pub mod categorical;
pub mod cli;
pub mod columns;
pub mod data;
pub mod dedup;
pub mod error;
pub mod frame;
pub mod impute;
pub mod io_utils;
pub mod loader;
pub mod pipeline;
pub mod rules;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands},
    impute::AllMissingPolicy,
    loader::LoadOptions,
    pipeline::CleanPipeline,
    rules::CleaningRules,
};

pub use crate::{
    error::CleanError,
    frame::{Column, ColumnKind, Table},
    pipeline::clean_file,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_cleanse", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Clean(args) => handle_clean(&args),
        Commands::Probe(args) => handle_probe(&args),
        Commands::Rules => handle_rules(),
    }
}

fn handle_clean(args: &cli::CleanArgs) -> Result<()> {
    let input_delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let rules = match &args.rules {
        Some(path) => CleaningRules::load(path)
            .with_context(|| format!("Loading cleaning rules from {path:?}"))?,
        None => CleaningRules::default(),
    };
    let dedup_subset = args
        .dedup_columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    debug!("Duplicate subset: {:?}", dedup_subset);

    let pipeline = CleanPipeline {
        load: LoadOptions {
            delimiter: Some(input_delimiter),
            encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
            ..LoadOptions::default()
        },
        rules,
        dedup_subset: (!dedup_subset.is_empty()).then_some(dedup_subset),
        all_missing: if args.strict_median {
            AllMissingPolicy::Fail
        } else {
            AllMissingPolicy::KeepMissing
        },
    };
    let cleaned = pipeline
        .run(&args.input)
        .with_context(|| format!("Cleaning {:?}", args.input))?;

    if args.preview {
        table::print_head(&cleaned, args.rows);
        return Ok(());
    }

    let output = args.output.as_deref();
    let output_delimiter =
        io_utils::resolve_output_delimiter(output, args.output_delimiter, input_delimiter);
    pipeline::write_table(&cleaned, output, output_delimiter)?;
    info!(
        "Wrote {} row(s) -> {} (delimiter '{}')",
        cleaned.row_count(),
        output
            .filter(|p| !io_utils::is_dash(p))
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string()),
        printable_delimiter(output_delimiter)
    );
    Ok(())
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        ..LoadOptions::default()
    };
    let loaded = loader::load_with_options(&args.input, &options)
        .with_context(|| format!("Loading {:?}", args.input))?;
    let headers = ["column", "kind", "missing"].map(String::from).to_vec();
    let rows = loaded
        .columns()
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.kind.as_str().to_string(),
                c.missing_count().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    print!("{}", table::render_rows(&headers, &rows));
    info!(
        "Probed {} column(s) across {} row(s)",
        loaded.column_count(),
        loaded.row_count()
    );
    Ok(())
}

fn handle_rules() -> Result<()> {
    let yaml = CleaningRules::default().to_yaml_string()?;
    print!("{yaml}");
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
