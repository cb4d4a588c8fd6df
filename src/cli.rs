//! Command-line arguments for the consolidator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "sheet-consolidator",
    version,
    about = "Consolidate xlsx files into one workbook",
    long_about = "Consolidate the first worksheet of each xlsx file into one table.\n\n\
                  Header columns are filled down, every row is labelled with its source\n\
                  file and columns are ordered by the shipping schema."
)]
pub struct Cli {
    /// Workbooks to consolidate, as paths or glob patterns, in upload order.
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Where to write the consolidated workbook (default: consolidated_data.xlsx).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Read the first worksheet whose name matches this glob (repeatable).
    #[arg(long = "sheet", value_name = "PATTERN")]
    pub sheets: Vec<String>,

    /// Number of rows shown in the preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,

    /// Do not print the preview.
    #[arg(long = "no-preview")]
    pub no_preview: bool,

    /// Read error cells such as #DIV/0! as empty.
    #[arg(long = "error-as-null")]
    pub error_as_null: bool,

    /// Keep rows without any value instead of dropping them.
    #[arg(long = "keep-empty-rows")]
    pub keep_empty_rows: bool,

    /// Consolidate and preview without writing the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["sheet-consolidator", "A_X1.xlsx", "data/*.xlsx"]).unwrap();
        assert_eq!(cli.files, vec!["A_X1.xlsx", "data/*.xlsx"]);
        assert_eq!(cli.output, None);
        assert_eq!(cli.preview_rows, 5);
        assert!(cli.sheets.is_empty());
        assert!(!cli.dry_run && !cli.no_preview && !cli.error_as_null && !cli.keep_empty_rows);
    }

    #[test]
    fn options() {
        let cli = Cli::try_parse_from([
            "sheet-consolidator",
            "-o",
            "out.xlsx",
            "--sheet",
            "BL*",
            "--sheet",
            "Data",
            "--preview-rows",
            "10",
            "--log-format",
            "json",
            "-vv",
            "A_X1.xlsx",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.xlsx")));
        assert_eq!(cli.sheets, vec!["BL*", "Data"]);
        assert_eq!(cli.preview_rows, 10);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(cli.verbosity.is_present());
    }
}
