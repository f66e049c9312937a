//! Stepscribe - Scribe recordings to Playwright tests
//!
//! Converts the HTML export of a Scribe browser recording into an ordered
//! list of typed test steps, and renders those steps as a runnable
//! `@playwright/test` script.
//!
//! # Architecture
//!
//! - **Core**: Step data model, configuration, and error handling
//! - **Parser**: Action classifier, selector builder, step extractor,
//!   markup parser and validator
//! - **Generator**: Playwright source generation and file output
//! - **CLI**: Command handlers for the `stepscribe` binary
//!
//! # Usage
//!
//! ```rust
//! use stepscribe::{generate, parse, safe_filename, validate, GenerateOptions};
//!
//! let markup = r#"
//!     <h1 class="scribe-title">Open docs</h1>
//!     <div class="scribe-step"><span class="scribe-step-text">1. Navigate to https://example.com</span></div>
//! "#;
//!
//! let test_case = parse(markup);
//! assert!(validate(&test_case).is_valid);
//!
//! let source = generate(&test_case, &GenerateOptions::default());
//! assert!(source.contains("await page.goto('https://example.com');"));
//! assert_eq!(safe_filename(&test_case.title), "open-docs.spec.js");
//! ```

pub mod cli;
pub mod core;
pub mod generator;
pub mod parser;

// Re-export commonly used items
pub use crate::core::{ActionType, Config, Result, Step, StepscribeError, TestCase, ValidationReport};
pub use generator::{generate, safe_filename, GenerateOptions, ScriptWriter};
pub use parser::{classify, extract, parse, validate, MarkupParser};
