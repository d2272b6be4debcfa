use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Format of the `pillars` listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "agent-readiness")]
#[command(
    author,
    version,
    about = "Score how ready a repository is for autonomous AI-agent collaboration"
)]
#[command(long_about = "Evaluates a repository against eight readiness pillars and \
    reports a 0-100 score with a maturity level from 1 (Initial) to 5 (Optimizing).\n\n\
    Exit codes:\n  \
    0 - Maturity level at or above the pass level\n  \
    1 - Maturity level below the pass level\n  \
    2 - Configuration, target or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the report and progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a repository and report its readiness score
    Scan(ScanArgs),

    /// List the available pillars and their weights
    Pillars(PillarsArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Repository directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format [possible values: text, json, markdown]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Only run these pillars (repeatable, case-insensitive)
    #[arg(short, long = "pillar", value_name = "NAME")]
    pub pillars: Vec<String>,

    /// Only show checks at this maturity level
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub level: Option<u8>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maturity level required for exit code 0 (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub min_level: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct PillarsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ListFormat,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".agent-readiness.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
