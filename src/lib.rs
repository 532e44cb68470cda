//! MATLAB style checker core library.
//!
//! This crate exposes programmatic APIs for checking and formatting `.m`
//! sources. The `matlab_check` and `matlab_format` binaries are thin wrappers.
//!
//! High-level modules:
//! - `classify`: Splits a line into code and comment around `'` literals.
//! - `rules`: The fixed rule set and its forbidden-keyword configuration.
//! - `scanner`: Directory traversal and per-file rule evaluation.
//! - `output`: Human/JSON report, bounded console output, verbose log.
//! - `format`: Comma-spacing normalization, file/directory formatting, diffs.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binaries use this).
//! - `models`: Task, diagnostic and result types.
//! - `error`: Crate error type.
//! - `utils`: Console prefixes and tracing setup.
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod utils;
