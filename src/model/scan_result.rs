use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::maturity::{level_for_score, maturity_label, weighted_score};

use super::PillarResult;

/// Terminal output of one scan: every pillar result plus the overall verdict.
///
/// `overall_score` and `maturity_level` are computed from `pillars` at construction and
/// check counts are always derived, so the aggregate never drifts from its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pillars: Vec<PillarResult>,
    overall_score: f64,
    maturity_level: u8,
    target_directory: String,
}

#[derive(Serialize)]
struct ScanReport<'a> {
    target_directory: &'a str,
    overall_score: f64,
    maturity_level: u8,
    maturity_label: &'static str,
    summary: Summary,
    pillars: &'a [PillarResult],
}

#[derive(Serialize)]
struct Summary {
    total_checks: usize,
    passed: usize,
    failed: usize,
    pass_rate: String,
}

impl ScanResult {
    #[must_use]
    pub fn from_pillars(target_directory: impl Into<String>, pillars: Vec<PillarResult>) -> Self {
        let overall_score = weighted_score(&pillars);
        Self {
            maturity_level: level_for_score(overall_score),
            overall_score,
            pillars,
            target_directory: target_directory.into(),
        }
    }

    /// A view where every pillar keeps only checks at `level`.
    ///
    /// Scores and maturity come from the full scan and are left as they were.
    #[must_use]
    pub fn filter_by_level(&self, level: u8) -> Self {
        Self {
            pillars: self
                .pillars
                .iter()
                .map(|p| p.filter_by_level(level))
                .collect(),
            overall_score: self.overall_score,
            maturity_level: self.maturity_level,
            target_directory: self.target_directory.clone(),
        }
    }

    #[must_use]
    pub fn pillars(&self) -> &[PillarResult] {
        &self.pillars
    }

    #[must_use]
    pub const fn overall_score(&self) -> f64 {
        self.overall_score
    }

    #[must_use]
    pub const fn maturity_level(&self) -> u8 {
        self.maturity_level
    }

    #[must_use]
    pub fn maturity_label(&self) -> &'static str {
        maturity_label(self.maturity_level)
    }

    #[must_use]
    pub fn target_directory(&self) -> &str {
        &self.target_directory
    }

    #[must_use]
    pub fn total_checks(&self) -> usize {
        self.pillars.iter().map(PillarResult::total).sum()
    }

    #[must_use]
    pub fn passed_checks(&self) -> usize {
        self.pillars.iter().map(PillarResult::passed).sum()
    }

    #[must_use]
    pub fn failed_checks(&self) -> usize {
        self.pillars.iter().map(PillarResult::failed).sum()
    }

    /// Percentage of checks passed across all pillars; 0 when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        let total = self.total_checks();
        if total == 0 {
            return 0.0;
        }
        100.0 * self.passed_checks() as f64 / total as f64
    }

    /// Lossless structured form with string keys, ready for JSON encoding.
    ///
    /// # Errors
    /// Returns an error if a metadata value cannot be represented as JSON.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn report(&self) -> ScanReport<'_> {
        ScanReport {
            target_directory: &self.target_directory,
            overall_score: self.overall_score,
            maturity_level: self.maturity_level,
            maturity_label: self.maturity_label(),
            summary: Summary {
                total_checks: self.total_checks(),
                passed: self.passed_checks(),
                failed: self.failed_checks(),
                pass_rate: format!("{:.1}%", self.pass_rate()),
            },
            pillars: &self.pillars,
        }
    }
}

impl Serialize for ScanResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.report().serialize(serializer)
    }
}

#[cfg(test)]
#[path = "scan_result_tests.rs"]
mod tests;
