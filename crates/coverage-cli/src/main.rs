//! Coverage Gate CLI.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{ColorChoice, Parser};
use coverage_cli::commands::{
    EXIT_FAILURE, EXIT_REJECTED, exit_code, run_add, run_doctor, run_rules,
};
use coverage_cli::config::GateConfig;
use coverage_cli::logging::{LogConfig, LogFormat, init_logging};
use coverage_model::CoverageRequest;
use rust_decimal::Decimal;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_add_result, print_doctor_report, print_rule_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }
    let code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            exit_code(&error)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = GateConfig::load(cli.config.as_deref())
        .context("load configuration")?
        .with_overrides(cli.database, cli.as_of);

    let code = match cli.command {
        Command::Add(args) => {
            let request = CoverageRequest::new(args.contract, args.coverage_type, args.amount);
            let result = run_add(&config, request, args.dry_run)?;
            print_add_result(&result);
            if result.is_rejected() { EXIT_REJECTED } else { 0 }
        }
        Command::Rules(args) => {
            let request = CoverageRequest::new(
                args.contract,
                args.coverage_type,
                args.amount.unwrap_or(Decimal::ZERO),
            );
            let report = run_rules(&config, &request)?;
            print_rule_report(&report);
            0
        }
        Command::Doctor(args) => {
            let report = run_doctor(&config)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_doctor_report(&report);
            }
            if report.is_healthy() { 0 } else { EXIT_FAILURE }
        }
    };
    Ok(code)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
