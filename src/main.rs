//! Sheet Consolidator CLI.

use anyhow::{Context, Result};
use clap::Parser;
use sheet_consolidator::consolidator::expand_paths;
use sheet_consolidator::logging::{LogConfig, LogFormat, init_logging};
use sheet_consolidator::{Consolidation, Criteria, SourceFile, consolidate, download};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;

mod cli;
mod preview;

use crate::cli::{Cli, LogFormatArg};
use crate::preview::print_preview;

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let criteria = criteria_from_cli(cli)?;
    let paths = expand_paths(&cli.files).context("failed to expand input files")?;
    let files = paths
        .iter()
        .map(|path| SourceFile::open(path, &criteria))
        .collect::<Result<Vec<_>, _>>()?;

    let table = match consolidate(&files) {
        Consolidation::Consolidated(table) => table,
        outcome @ Consolidation::NoFiles => {
            println!("{}", outcome.message().unwrap_or_default());
            return Ok(0);
        }
        outcome @ Consolidation::NoData => {
            eprintln!("warning: {}", outcome.message().unwrap_or_default());
            return Ok(1);
        }
    };

    if !cli.no_preview {
        print_preview(&table, cli.preview_rows);
    }
    if cli.dry_run {
        info!("Dry run, nothing written");
        return Ok(0);
    }

    let download = download(&table)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(download.file_name));
    std::fs::write(&output, &download.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = download.bytes.len(), mime = download.mime_type, "Wrote workbook");
    println!("Wrote {} rows to {}", table.table().height(), output.display());
    Ok(0)
}

/// Reader options from CLI flags.
fn criteria_from_cli(cli: &Cli) -> Result<Criteria> {
    let criteria = Criteria {
        error_as_null: cli.error_as_null,
        skip_empty_rows: !cli.keep_empty_rows,
        ..Criteria::default()
    };
    criteria
        .with_sheet_patterns(&cli.sheets)
        .context("invalid --sheet pattern")
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: cli.log_file.is_none() && io::stderr().is_terminal(),
    }
}
