//! Configuration management for Stepscribe
//!
//! Supports environment variables, config files, and runtime overrides.
//! The markup selectors are configurable so exports from other recorder
//! themes can be read without code changes.
//!
//! Config file location: ~/.config/stepscribe/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, StepscribeError};

/// Main configuration for Stepscribe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Recording markup conventions
    #[serde(default)]
    pub parser: ParserConfig,
    /// Script generation settings
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CSS selectors locating the parts of a recording
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Element holding the recording title
    pub title_selector: String,
    /// One element per recorded step
    pub step_selector: String,
    /// Element inside a step holding its description
    pub step_text_selector: String,
    /// Sibling element directly after a step that holds its screenshot
    pub screenshot_container_selector: String,
    /// Image inside the screenshot container
    pub screenshot_selector: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            title_selector: ".scribe-title".to_string(),
            step_selector: ".scribe-step".to_string(),
            step_text_selector: ".scribe-step-text".to_string(),
            screenshot_container_selector: ".scribe-screenshot-container".to_string(),
            screenshot_selector: ".scribe-screenshot".to_string(),
        }
    }
}

/// Script generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory generated scripts are written to
    /// Default: generated-tests
    pub output_dir: PathBuf,
    /// Page opened before the first step
    pub base_url: Option<String>,
    /// Capture a screenshot after every step
    pub screenshots: bool,
    /// Directory screenshots are saved to when the script runs
    pub screenshot_dir: String,
    /// Write a playwright.config.js next to the output directory if missing
    pub write_playwright_config: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: env::var("STEPSCRIBE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("generated-tests")),
            base_url: env::var("STEPSCRIBE_BASE_URL").ok().filter(|u| !u.is_empty()),
            screenshots: env::var("STEPSCRIBE_SCREENSHOTS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            screenshot_dir: "screenshots".to_string(),
            write_playwright_config: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG
    /// Default: info
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: env::var("STEPSCRIBE_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stepscribe")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_from_path(&Self::config_file())
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse or validate is
    /// an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            StepscribeError::with_context(format!("Failed to read {}", path.display()), e)
        })?;

        Self::from_toml(&content).map_err(|e| {
            StepscribeError::with_context(format!("Invalid config {}", path.display()), e)
        })
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| StepscribeError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.generator.base_url {
            url::Url::parse(base_url).map_err(|e| {
                StepscribeError::config(format!("Invalid base_url '{}': {}", base_url, e))
            })?;
        }
        if self.parser.step_selector.trim().is_empty() {
            return Err(StepscribeError::config("parser.step_selector must not be empty"));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        fs::create_dir_all(&config_dir)
            .map_err(|e| StepscribeError::config(format!("Failed to create config dir: {}", e)))?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| StepscribeError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| StepscribeError::config(format!("Failed to write config: {}", e)))?;

        Ok(config_path)
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
