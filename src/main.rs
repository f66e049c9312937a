//! Stepscribe - Scribe recordings to Playwright tests
//!
//! Main entry point for the CLI application.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use stepscribe::cli::commands::{
    config_command, format_report, generate_command, parse_command, validate_command,
};
use stepscribe::cli::{ConfigAction, GenerateRequest};
use stepscribe::{Config, MarkupParser};

/// Stepscribe - turn Scribe recordings into Playwright tests
#[derive(Parser, Debug)]
#[command(name = "stepscribe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a recording and print the test case as JSON
    Parse {
        /// Scribe HTML export
        file: PathBuf,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Check a recording for structural problems
    Validate {
        /// Scribe HTML export
        file: PathBuf,
    },

    /// Generate Playwright test files from recordings
    Generate {
        /// Scribe HTML exports
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory for generated tests
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Page to open before the first step
        #[arg(long)]
        base_url: Option<String>,

        /// Take a screenshot after every step
        #[arg(long)]
        screenshots: bool,

        /// Generate even if validation fails
        #[arg(long)]
        force: bool,

        /// Print scripts instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init,
    /// Print the config file location
    Path,
}

impl From<ConfigCommand> for ConfigAction {
    fn from(command: ConfigCommand) -> Self {
        match command {
            ConfigCommand::Show => ConfigAction::Show,
            ConfigCommand::Init => ConfigAction::Init,
            ConfigCommand::Path => ConfigAction::Path,
        }
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load()?;
    init_logging(if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    });

    let parser = MarkupParser::new(&config.parser)?;

    match args.command {
        Command::Parse { file, compact } => {
            println!("{}", parse_command(&parser, &file, compact).await?);
        }

        Command::Validate { file } => {
            let report = validate_command(&parser, &file).await?;
            println!("{}", format_report(&file, &report));
            if !report.is_valid {
                std::process::exit(1);
            }
        }

        Command::Generate {
            files,
            output,
            base_url,
            screenshots,
            force,
            stdout,
        } => {
            // Apply CLI overrides
            if let Some(output) = output {
                config.generator.output_dir = output;
            }
            if base_url.is_some() {
                config.generator.base_url = base_url;
            }
            if screenshots {
                config.generator.screenshots = true;
            }
            config.validate()?;

            let request = GenerateRequest {
                files,
                force,
                stdout,
            };
            let summary = generate_command(&config, &parser, &request).await?;
            if stdout {
                println!("{}", summary.printed.join("\n"));
            } else {
                print!("{}", summary.format_for_display());
            }
        }

        Command::Config { action } => {
            let action = action.unwrap_or(ConfigCommand::Show);
            println!("{}", config_command(&config, action.into())?);
        }
    }

    Ok(())
}
