use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("Configuration error: no pillars registered")]
    NoPillars,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown pillar: {0}")]
    UnknownPillar(String),

    #[error("Target not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    #[error("Invalid target: {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Pillar '{pillar}' failed: {message}")]
    Pillar { pillar: String, message: String },

    #[error("Pillar '{pillar}' produced an invalid check: {reason}")]
    InvalidCheck { pillar: String, reason: String },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl ReadinessError {
    /// Short category name of the error.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::NoPillars
            | Self::Config(_)
            | Self::UnknownPillar(_)
            | Self::InvalidPattern { .. } => "Config",
            Self::TargetNotFound(_) | Self::NotADirectory(_) => "Target",
            Self::Pillar { .. } | Self::InvalidCheck { .. } => "Pillar",
            Self::FileRead { .. } | Self::Io(_) => "IO",
            Self::TomlParse(_) => "Parse",
            Self::JsonSerialize(_) => "Serialize",
        }
    }

    /// Whether this error was raised before any pillar ran.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoPillars | Self::TargetNotFound(_) | Self::NotADirectory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReadinessError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
