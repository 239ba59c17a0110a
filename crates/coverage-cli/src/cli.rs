//! CLI argument definitions for `coverage-gate`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use coverage_model::{ContractId, CoverageTypeId, parse_amount};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(
    name = "coverage-gate",
    version,
    about = "Validate and add coverages to insurance contracts",
    long_about = "Validate and add coverages to insurance contracts.\n\n\
                  A coverage is only persisted when the contract and coverage type exist,\n\
                  belong to the same product, the amount is offered and currently priced,\n\
                  and no rejection rule of the coverage type matches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: $COVERAGE_GATE_CONFIG, then ./coverage.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the config file).
    #[arg(long = "database", value_name = "PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Evaluate price validity on this date instead of today (YYYY-MM-DD).
    #[arg(long = "as-of", value_name = "DATE", global = true)]
    pub as_of: Option<NaiveDate>,

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
    /// Validate a coverage and add it to a contract.
    Add(AddArgs),

    /// Show how each rejection rule of a coverage type evaluates for a contract.
    Rules(RulesArgs),

    /// Check the database connection and the required tables.
    Doctor(DoctorArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    /// Contract (`Vertrag.ID`).
    #[arg(value_name = "CONTRACT")]
    pub contract: ContractId,

    /// Coverage type (`Deckungsart.ID`).
    #[arg(value_name = "COVERAGE_TYPE")]
    pub coverage_type: CoverageTypeId,

    /// Coverage amount, e.g. 10000.00.
    #[arg(value_name = "AMOUNT", value_parser = parse_amount)]
    pub amount: Decimal,

    /// Run every check but write nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Coverage type (`Deckungsart.ID`).
    #[arg(value_name = "COVERAGE_TYPE")]
    pub coverage_type: CoverageTypeId,

    /// Contract whose customer age is used.
    #[arg(long = "contract", value_name = "ID")]
    pub contract: ContractId,

    /// Amount evaluated against amount thresholds.
    #[arg(long = "amount", value_name = "AMOUNT", value_parser = parse_amount)]
    pub amount: Option<Decimal>,
}

#[derive(Parser)]
pub struct DoctorArgs {
    /// Print the report as JSON.
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
