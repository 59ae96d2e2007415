//! CLI argument definitions for the X12 regenerator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "x12-regen",
    version,
    about = "X12 EDI purchase-order regenerator",
    long_about = "Regenerate ANSI X12 purchase-order interchanges.\n\n\
                  Rewrites envelope identity fields, stamps fresh control numbers,\n\
                  recomputes segment and line-item counts, and shifts DTM/G62 dates.\n\
                  Handles 850 purchase orders and 875 grocery purchase orders."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Regenerate documents: one input runs single mode, several run bulk.
    Generate(GenerateArgs),

    /// Shift every DTM/G62 date in the given documents by a number of days.
    ShiftDates(ShiftDatesArgs),

    /// Print what a scan finds in one document.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Input EDI files.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// JSON plan with envelope overrides, line-item decisions and date edits.
    #[arg(long = "plan", value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Purchase-order number; bulk mode appends T1, T2, ... per document.
    #[arg(long = "po-number", value_name = "NUMBER")]
    pub po_number: Option<String>,

    /// Purchase-order date for BEG05.
    #[arg(long = "po-date", value_name = "CCYYMMDD")]
    pub po_date: Option<String>,

    /// Interchange sender ID (ISA06, padded to 15 characters).
    #[arg(long = "sender-id", value_name = "ID")]
    pub sender_id: Option<String>,

    /// Interchange receiver ID (ISA08, padded to 15 characters).
    #[arg(long = "receiver-id", value_name = "ID")]
    pub receiver_id: Option<String>,

    /// Interchange sender ID qualifier (ISA05).
    #[arg(long = "sender-qualifier", value_name = "QUAL")]
    pub sender_qualifier: Option<String>,

    /// Interchange receiver ID qualifier (ISA07).
    #[arg(long = "receiver-qualifier", value_name = "QUAL")]
    pub receiver_qualifier: Option<String>,

    /// Functional group sender (GS02).
    #[arg(long = "gs-sender", value_name = "ID")]
    pub gs_sender: Option<String>,

    /// Functional group receiver (GS03).
    #[arg(long = "gs-receiver", value_name = "ID")]
    pub gs_receiver: Option<String>,

    /// Output directory (default: `output/` beside the first input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Plan and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ShiftDatesArgs {
    /// Input EDI files.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Days to add to every date; negative values shift backwards.
    #[arg(
        long = "days",
        value_name = "N",
        allow_hyphen_values = true,
        required = true
    )]
    pub days: i64,

    /// Output directory (default: `output/` beside the first input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Input EDI file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the scan as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
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
