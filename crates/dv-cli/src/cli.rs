//! CLI argument definitions for the DV standardization tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dv-standardize",
    version,
    about = "DV Standardization Workbench - Standardize dependent variable columns",
    long_about = "Standardize dependent variable columns in research datasets.\n\n\
                  Rewrites CSV headers against the standard DV mapping, infers\n\
                  measurement metadata for unmapped columns, and checks schema\n\
                  files for structural defects."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Standardize the column headers of a CSV dataset.
    Convert(ConvertArgs),

    /// Classify ad-hoc variable labels without touching a dataset.
    Infer(InferArgs),

    /// Check a schema file for structural defects.
    Validate(ValidateArgs),

    /// List the standardized DVs defined in the schema.
    Catalog(CatalogArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the input CSV dataset.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path (default: <INPUT stem>_standardized.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Schema file overriding the default standard DV mapping.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Rules file overriding the default inference rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Write the measurement metadata sidecar next to the output.
    #[arg(long = "with-metadata")]
    pub with_metadata: bool,

    /// Preview the header mapping without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Confidence below which an inferred column is flagged for review.
    #[arg(
        long = "confidence-threshold",
        value_name = "FLOAT",
        default_value_t = 0.7
    )]
    pub confidence_threshold: f32,
}

#[derive(Parser)]
pub struct InferArgs {
    /// Variable labels to classify.
    #[arg(value_name = "LABEL", required = true)]
    pub labels: Vec<String>,

    /// Rules file overriding the default inference rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Confidence below which a label is flagged for review.
    #[arg(long = "threshold", value_name = "FLOAT", default_value_t = 0.7)]
    pub threshold: f32,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Schema file to check (default: the standard DV mapping).
    #[arg(value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Cluster catalog for cross-reference checks.
    #[arg(long = "clusters", value_name = "PATH")]
    pub clusters: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Schema file to list (default: the standard DV mapping).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,
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
