mod json;
mod markdown;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use progress::ScanProgress;
pub use text::{ColorMode, TextFormatter};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ScanResult;

/// Renders a finished scan into one of the report formats.
pub trait OutputFormatter {
    /// Format the scan result into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, result: &ScanResult) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[serde(alias = "md")]
    Markdown,
}

impl OutputFormat {
    /// Build the formatter for this format.
    #[must_use]
    pub fn formatter(self, color: ColorMode, verbose: u8) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::with_verbose(color, verbose)),
            Self::Json => Box::new(JsonFormatter),
            Self::Markdown => Box::new(MarkdownFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
