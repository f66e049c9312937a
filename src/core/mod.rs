//! Core module - shared infrastructure for Stepscribe
//!
//! This module contains the step data model, configuration, and error
//! handling used throughout the crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, GeneratorConfig, LoggingConfig, ParserConfig};
pub use error::{Result, StepscribeError};
pub use types::*;
