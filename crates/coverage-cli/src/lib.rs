//! Library side of the `coverage-gate` command.

pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
