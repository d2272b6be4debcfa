//! Built-in pillars and the default registry.

mod build;
mod dev_environment;
mod documentation;
mod observability;
pub mod probe;
mod security;
mod style;
mod task_discovery;
mod testing;

pub use build::BuildPillar;
pub use dev_environment::DevEnvironmentPillar;
pub use documentation::DocumentationPillar;
pub use observability::ObservabilityPillar;
pub use security::SecurityPillar;
pub use style::StylePillar;
pub use task_discovery::TaskDiscoveryPillar;
pub use testing::TestingPillar;

use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

/// Fresh instances of every built-in pillar, in report order.
#[must_use]
pub fn default_pillars() -> Vec<Box<dyn Pillar>> {
    vec![
        Box::new(StylePillar),
        Box::new(BuildPillar),
        Box::new(TestingPillar),
        Box::new(DocumentationPillar),
        Box::new(DevEnvironmentPillar),
        Box::new(ObservabilityPillar),
        Box::new(SecurityPillar),
        Box::new(TaskDiscoveryPillar),
    ]
}

/// Look up a built-in pillar by display name, ignoring case and surrounding whitespace.
#[must_use]
pub fn find_pillar(name: &str) -> Option<Box<dyn Pillar>> {
    let wanted = name.trim();
    default_pillars()
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(wanted))
}

#[must_use]
pub fn pillar_names() -> Vec<String> {
    default_pillars()
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

/// Static identity of one check: name, maturity level and severity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CheckDef {
    name: &'static str,
    level: u8,
    severity: Severity,
}

impl CheckDef {
    pub(crate) const fn new(name: &'static str, level: u8, severity: Severity) -> Self {
        Self {
            name,
            level,
            severity,
        }
    }

    pub(crate) fn outcome(&self, passed: bool, message: impl Into<String>) -> CheckResult {
        CheckResult::new(self.name, passed, message)
            .with_severity(self.severity)
            .with_level(self.level)
    }

    pub(crate) fn pass(&self, message: impl Into<String>) -> CheckResult {
        self.outcome(true, message)
    }

    pub(crate) fn fail(&self, message: impl Into<String>) -> CheckResult {
        self.outcome(false, message)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
