//! CLI commands
//!
//! Handlers behind the `stepscribe` subcommands. They read recordings from
//! disk, run the parser/validator/generator, and return text for the caller
//! to print.

use std::path::{Path, PathBuf};

use crate::core::{Config, Result, StepscribeError, TestCase, ValidationReport};
use crate::generator::{
    ensure_playwright_config, generate, DirectorySink, GenerateOptions, GeneratedScript,
    ScriptWriter,
};
use crate::parser::{validate, MarkupParser};

/// Read a recording file
pub async fn read_recording(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StepscribeError::with_context(format!("Failed to read {}", path.display()), e))
}

/// Parse a recording and render it as JSON
pub async fn parse_command(parser: &MarkupParser, path: &Path, compact: bool) -> Result<String> {
    let markup = read_recording(path).await?;
    let test_case = parser.parse(&markup);
    let json = if compact {
        serde_json::to_string(&test_case)?
    } else {
        serde_json::to_string_pretty(&test_case)?
    };
    Ok(json)
}

/// Parse and validate a recording
pub async fn validate_command(parser: &MarkupParser, path: &Path) -> Result<ValidationReport> {
    let markup = read_recording(path).await?;
    Ok(validate(&parser.parse(&markup)))
}

/// Human-readable validation report
pub fn format_report(path: &Path, report: &ValidationReport) -> String {
    if report.is_valid {
        return format!("{}: valid", path.display());
    }
    let mut output = format!("{}: {} problem(s)", path.display(), report.errors.len());
    for error in &report.errors {
        output.push_str(&format!("\n  - {}", error));
    }
    output
}

/// Flags for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Recordings to convert
    pub files: Vec<PathBuf>,
    /// Generate even when validation fails
    pub force: bool,
    /// Print scripts instead of writing files
    pub stdout: bool,
}

/// Outcome of the generate command
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Scripts written to disk
    pub written: Vec<GeneratedScript>,
    /// Recordings skipped because they failed validation
    pub skipped: Vec<(PathBuf, Vec<String>)>,
    /// Playwright config created by this run
    pub playwright_config: Option<PathBuf>,
    /// Script sources, when printing to stdout
    pub printed: Vec<String>,
}

impl GenerateSummary {
    /// Format the summary for display
    pub fn format_for_display(&self) -> String {
        let mut output = String::new();
        for script in &self.written {
            output.push_str(&format!("Generated {}\n", script.path.display()));
        }
        if let Some(path) = &self.playwright_config {
            output.push_str(&format!("Created {}\n", path.display()));
        }
        for (path, errors) in &self.skipped {
            output.push_str(&format!(
                "Skipped {} ({})\n",
                path.display(),
                errors.join("; ")
            ));
        }
        output
    }
}

/// Parse, validate and generate scripts for a set of recordings
pub async fn generate_command(
    config: &Config,
    parser: &MarkupParser,
    request: &GenerateRequest,
) -> Result<GenerateSummary> {
    let mut summary = GenerateSummary::default();
    let mut cases: Vec<TestCase> = Vec::with_capacity(request.files.len());

    for path in &request.files {
        let test_case = parser.parse(&read_recording(path).await?);
        let report = validate(&test_case);
        if !report.is_valid {
            for error in &report.errors {
                tracing::warn!(file = %path.display(), "{}", error);
            }
            if !request.force {
                summary.skipped.push((path.clone(), report.errors));
                continue;
            }
        }
        cases.push(test_case);
    }

    if cases.is_empty() && !summary.skipped.is_empty() {
        let errors = summary
            .skipped
            .iter()
            .flat_map(|(path, errors)| {
                errors
                    .iter()
                    .map(move |e| format!("{}: {}", path.display(), e))
            })
            .collect();
        return Err(StepscribeError::Validation(errors));
    }

    let options = GenerateOptions::from(&config.generator);
    if request.stdout {
        summary.printed = cases.iter().map(|c| generate(c, &options)).collect();
        return Ok(summary);
    }

    let output_dir = config.generator.output_dir.clone();
    let writer = ScriptWriter::new(DirectorySink::new(&output_dir), options);
    summary.written = writer.write_all(&cases).await?;

    if config.generator.write_playwright_config {
        summary.playwright_config =
            ensure_playwright_config(&output_dir, config.generator.base_url.as_deref()).await?;
    }

    Ok(summary)
}

/// Config subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init,
    /// Print the config file location
    Path,
}

/// Handle a config subcommand
pub fn config_command(config: &Config, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Show => toml::to_string_pretty(config)
            .map_err(|e| StepscribeError::config(format!("Failed to serialize config: {}", e))),
        ConfigAction::Path => Ok(Config::config_file().display().to_string()),
        ConfigAction::Init => {
            if Config::config_exists() {
                return Ok(format!(
                    "Config already exists at {}",
                    Config::config_file().display()
                ));
            }
            let path = Config::default().save()?;
            Ok(format!("Wrote default config to {}", path.display()))
        }
    }
}
