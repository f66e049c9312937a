//! CLI module - command-line interface
//!
//! Contains the handlers behind the `stepscribe` subcommands.

pub mod commands;

pub use commands::{ConfigAction, GenerateRequest, GenerateSummary};
