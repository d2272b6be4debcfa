use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use super::CheckResult;

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Score of a pillar that produced no checks.
pub const EMPTY_PILLAR_SCORE: f64 = 100.0;

/// All checks produced by one pillar run, plus the pillar's score and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct PillarResult {
    name: String,
    checks: Vec<CheckResult>,
    score: f64,
    weight: f64,
}

impl PillarResult {
    /// Builds a result and scores it: `100 * passed / total`, or 100 when empty.
    ///
    /// A negative or non-finite `weight` is stored as 0, which leaves the pillar out of the
    /// overall score.
    #[must_use]
    pub fn from_checks(name: impl Into<String>, checks: Vec<CheckResult>, weight: f64) -> Self {
        let score = score_checks(&checks);
        Self {
            name: name.into(),
            checks,
            score,
            weight: sanitize_weight(weight),
        }
    }

    /// A view keeping only checks at `level`. Score and weight are carried over unchanged.
    #[must_use]
    pub fn filter_by_level(&self, level: u8) -> Self {
        Self {
            name: self.name.clone(),
            checks: self
                .checks
                .iter()
                .filter(|c| c.level() == level)
                .cloned()
                .collect(),
            score: self.score,
            weight: self.weight,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.is_passed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|c| c.is_failed()).count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| c.is_failed())
    }
}

/// `weight` if it is finite and non-negative, otherwise 0.
#[must_use]
pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn score_checks(checks: &[CheckResult]) -> f64 {
    if checks.is_empty() {
        return EMPTY_PILLAR_SCORE;
    }
    let passed = checks.iter().filter(|c| c.is_passed()).count();
    100.0 * passed as f64 / checks.len() as f64
}

impl Serialize for PillarResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PillarResult", 7)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("weight", &self.weight)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("failed", &self.failed())?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("checks", &self.checks)?;
        state.end()
    }
}

#[cfg(test)]
#[path = "pillar_result_tests.rs"]
mod tests;
