use std::path::Path;

use tracing::{debug, info};

use crate::error::{ReadinessError, Result};
use crate::model::ScanResult;
use crate::pillar::Pillar;

/// Runs an ordered set of pillars against one target directory.
///
/// Pillars run sequentially in registration order. Registering the same pillar twice is
/// allowed and both copies run.
#[derive(Default)]
pub struct Scanner {
    pillars: Vec<Box<dyn Pillar>>,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_pillar(&mut self, pillar: Box<dyn Pillar>) {
        self.pillars.push(pillar);
    }

    pub fn register_pillars<I>(&mut self, pillars: I)
    where
        I: IntoIterator<Item = Box<dyn Pillar>>,
    {
        self.pillars.extend(pillars);
    }

    #[must_use]
    pub fn pillar_count(&self) -> usize {
        self.pillars.len()
    }

    pub fn pillar_names(&self) -> impl Iterator<Item = &str> {
        self.pillars.iter().map(|p| p.name())
    }

    /// Scan `target` with every registered pillar.
    ///
    /// # Errors
    /// Fails before any pillar runs when no pillars are registered, the target does not
    /// exist, or the target is not a directory. A failing pillar aborts the scan.
    pub fn scan(&self, target: &Path) -> Result<ScanResult> {
        self.scan_with_progress(target, |_| {})
    }

    /// Like [`Scanner::scan`], calling `on_pillar` with each pillar's name before it runs.
    ///
    /// # Errors
    /// Same as [`Scanner::scan`].
    pub fn scan_with_progress<F>(&self, target: &Path, mut on_pillar: F) -> Result<ScanResult>
    where
        F: FnMut(&str),
    {
        if self.pillars.is_empty() {
            return Err(ReadinessError::NoPillars);
        }
        let root = resolve_target(target)?;

        let mut results = Vec::with_capacity(self.pillars.len());
        for pillar in &self.pillars {
            on_pillar(pillar.name());
            debug!(pillar = pillar.name(), "evaluating pillar");
            let result = pillar.run(&root)?;
            debug!(
                pillar = result.name(),
                passed = result.passed(),
                total = result.total(),
                score = result.score(),
                "pillar finished"
            );
            results.push(result);
        }

        let scan = ScanResult::from_pillars(root.display().to_string(), results);
        info!(
            target = scan.target_directory(),
            score = scan.overall_score(),
            level = scan.maturity_level(),
            "scan complete"
        );
        Ok(scan)
    }
}

fn resolve_target(target: &Path) -> Result<std::path::PathBuf> {
    if !target.exists() {
        return Err(ReadinessError::TargetNotFound(target.to_path_buf()));
    }
    if !target.is_dir() {
        return Err(ReadinessError::NotADirectory(target.to_path_buf()));
    }
    Ok(dunce::canonicalize(target)?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
