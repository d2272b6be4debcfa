use std::path::Path;

use crate::error::{ReadinessError, Result};
use crate::model::{
    CheckResult, DEFAULT_WEIGHT, MAX_LEVEL, MIN_LEVEL, PillarResult, sanitize_weight,
};

/// An independently evaluable category of repository readiness.
///
/// Implementors supply `name` and `evaluate`; the scanner only ever calls [`Pillar::run`].
///
/// `evaluate` must treat ordinary filesystem conditions (missing, unreadable or malformed
/// files) as "not detected" and return a failed [`CheckResult`]. An `Err` means the pillar
/// itself is broken and aborts the whole scan.
pub trait Pillar: Send + Sync {
    fn name(&self) -> &str;

    fn weight(&self) -> f64 {
        DEFAULT_WEIGHT
    }

    /// Evaluate `target`, which the caller guarantees is an existing directory.
    ///
    /// # Errors
    /// Returns an error only when the pillar violates its own contract.
    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>>;

    /// Evaluate and score the pillar.
    ///
    /// # Errors
    /// Propagates errors from `evaluate`, and rejects checks with an empty name or message
    /// or a level outside `1..=5`.
    fn run(&self, target: &Path) -> Result<PillarResult> {
        let checks = self.evaluate(target)?;
        if let Some(reason) = checks.iter().find_map(invalid_reason) {
            return Err(ReadinessError::InvalidCheck {
                pillar: self.name().to_string(),
                reason,
            });
        }
        Ok(PillarResult::from_checks(self.name(), checks, self.weight()))
    }
}

fn invalid_reason(check: &CheckResult) -> Option<String> {
    if check.name().trim().is_empty() {
        return Some(format!("check with message '{}' has no name", check.message()));
    }
    if check.message().trim().is_empty() {
        return Some(format!("check '{}' has no message", check.name()));
    }
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&check.level()) {
        return Some(format!(
            "check '{}' has level {}, expected {MIN_LEVEL}..={MAX_LEVEL}",
            check.name(),
            check.level()
        ));
    }
    None
}

impl<P: Pillar + ?Sized> Pillar for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn weight(&self) -> f64 {
        (**self).weight()
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        (**self).evaluate(target)
    }

    fn run(&self, target: &Path) -> Result<PillarResult> {
        (**self).run(target)
    }
}

/// Wraps a pillar and replaces its weight.
pub struct Weighted<P> {
    inner: P,
    weight: f64,
}

impl<P: Pillar> Weighted<P> {
    /// Negative and non-finite weights become 0.
    #[must_use]
    pub fn new(inner: P, weight: f64) -> Self {
        Self {
            inner,
            weight: sanitize_weight(weight),
        }
    }
}

impl<P: Pillar> Pillar for Weighted<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        self.inner.evaluate(target)
    }
}

#[cfg(test)]
#[path = "pillar_tests.rs"]
mod tests;
