use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReadinessError, Result};
use crate::model::{MAX_LEVEL, MIN_LEVEL};
use crate::output::OutputFormat;
use crate::pillar::{Pillar, Weighted};
use crate::pillars::find_pillar;

/// Maturity level a repository must reach for a zero exit code.
pub const DEFAULT_MIN_LEVEL: u8 = 3;

/// Contents written by `agent-readiness init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# agent-readiness configuration

[scan]
# Report format: "text", "json" or "markdown".
format = "text"
# Maturity level (1-5) required for a zero exit code.
min_level = 3

[pillars]
# Pillars to skip, by display name (case-insensitive).
# disabled = ["Task Discovery"]
disabled = []

# Relative weight of each pillar in the overall score (default 1.0).
[pillars.weights]
# "Security" = 2.0
"#;

/// Settings read from `.agent-readiness.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub pillars: PillarsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Report format used when `--format` is not given.
    pub format: OutputFormat,
    /// Pass level for the exit code.
    pub min_level: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            min_level: DEFAULT_MIN_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PillarsConfig {
    pub disabled: Vec<String>,
    pub weights: IndexMap<String, f64>,
}

impl Config {
    /// Check ranges and pillar names.
    ///
    /// # Errors
    /// Returns [`ReadinessError::Config`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let level = self.scan.min_level;
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(ReadinessError::Config(format!(
                "scan.min_level must be between {MIN_LEVEL} and {MAX_LEVEL}, got {level}"
            )));
        }
        for name in &self.pillars.disabled {
            ensure_known(name, "pillars.disabled")?;
        }
        for (name, weight) in &self.pillars.weights {
            ensure_known(name, "pillars.weights")?;
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ReadinessError::Config(format!(
                    "weight for '{name}' must be a finite number >= 0, got {weight}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_disabled(&self, pillar: &str) -> bool {
        self.pillars
            .disabled
            .iter()
            .any(|d| d.trim().eq_ignore_ascii_case(pillar))
    }

    /// Configured weight for `pillar`, matched case-insensitively.
    #[must_use]
    pub fn weight_for(&self, pillar: &str) -> Option<f64> {
        self.pillars
            .weights
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(pillar))
            .map(|(_, weight)| *weight)
    }

    /// Drop disabled pillars and apply configured weights to the rest.
    #[must_use]
    pub fn configure_pillars(&self, pillars: Vec<Box<dyn Pillar>>) -> Vec<Box<dyn Pillar>> {
        pillars
            .into_iter()
            .filter(|p| {
                let disabled = self.is_disabled(p.name());
                if disabled {
                    debug!(pillar = p.name(), "pillar disabled by configuration");
                }
                !disabled
            })
            .map(|p| self.apply_weight(p))
            .collect()
    }

    /// Wrap `pillar` with its configured weight, if one is set.
    #[must_use]
    pub fn apply_weight(&self, pillar: Box<dyn Pillar>) -> Box<dyn Pillar> {
        match self.weight_for(pillar.name()) {
            Some(weight) => Box::new(Weighted::new(pillar, weight)),
            None => pillar,
        }
    }
}

fn ensure_known(name: &str, field: &str) -> Result<()> {
    if find_pillar(name).is_some() {
        Ok(())
    } else {
        Err(ReadinessError::Config(format!("{field}: unknown pillar '{name}'")))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
