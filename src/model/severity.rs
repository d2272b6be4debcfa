use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much a failed check matters, from least to most important.
///
/// The legacy `info`/`warning`/`error` names are accepted on input and map onto
/// `optional`/`recommended`/`required`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    #[serde(alias = "info")]
    Optional,
    #[serde(alias = "warning")]
    Recommended,
    #[serde(alias = "error")]
    Required,
    Critical,
}

impl Severity {
    pub const ALL: [Self; 4] = [
        Self::Optional,
        Self::Recommended,
        Self::Required,
        Self::Critical,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::Recommended => "recommended",
            Self::Required => "required",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "optional" | "info" => Ok(Self::Optional),
            "recommended" | "warning" => Ok(Self::Recommended),
            "required" | "error" => Ok(Self::Required),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown severity: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "severity_tests.rs"]
mod tests;
