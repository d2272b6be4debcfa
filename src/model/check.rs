use serde::Serialize;
use serde_json::{Map, Value};

use super::Severity;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Outcome of one evaluated criterion within a pillar.
///
/// Built once by a pillar and read-only afterwards. `level` is the maturity tier the
/// check belongs to, assigned by the pillar author; it is never derived from a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    name: String,
    passed: bool,
    message: String,
    severity: Severity,
    level: u8,
    metadata: Map<String, Value>,
}

impl CheckResult {
    #[must_use]
    pub fn new(name: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            message: message.into(),
            severity: Severity::default(),
            level: MIN_LEVEL,
            metadata: Map::new(),
        }
    }

    #[must_use]
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, true, message)
    }

    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, false, message)
    }

    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the maturity tier. [`Pillar::run`](crate::pillar::Pillar::run) rejects levels
    /// outside `1..=5`.
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    // Accessor methods

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        !self.passed
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
