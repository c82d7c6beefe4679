//! CLI argument definitions for the roster consolidator.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Expert roster consolidator - merge registration forms into one sheet",
    long_about = "Scan a folder of expert registration workbooks (.xlsx/.xls), extract every \
                  expert block found under the anchor label, derive document type, \
                  nationality, sex and birth date from the resident ID number, and write all \
                  records into one consolidated workbook grouped by source file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow names, ID numbers and account numbers to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging setup for this invocation.
    ///
    /// `--log-level` wins over `-v`/`-q`; either one turns off `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            format: self.log_format.into(),
            with_ansi: self.ansi_enabled(),
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            ..LogConfig::default()
        }
    }

    /// `auto` colors stderr only when it is a terminal and no log file is set.
    fn ansi_enabled(&self) -> bool {
        match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract records from every workbook in a folder and write the roster.
    Extract(ExtractArgs),

    /// Print the effective input and output layouts.
    Layout(LayoutArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Folder containing the registration workbooks.
    #[arg(value_name = "SOURCE_DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Consolidated workbook path (default: <SOURCE_DIR>/output.xlsx).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file overriding the form and output layout.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the consolidated sheet.
    #[arg(long = "sheet-name", value_name = "NAME")]
    pub sheet_name: Option<String>,

    /// Emit a header row of field names above the first group.
    #[arg(long = "header")]
    pub header: bool,

    /// Extract and summarize without writing the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct LayoutArgs {
    /// JSON file overriding the form and output layout.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
