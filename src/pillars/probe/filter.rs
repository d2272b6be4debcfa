use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{ReadinessError, Result};

/// Decides whether a file (path relative to the repository root) is of interest.
pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Matches files by extension and/or glob patterns on the root-relative path.
///
/// An empty extension list and an empty include list both mean "anything".
pub struct GlobFilter {
    extensions: Vec<String>,
    include_patterns: Option<GlobSet>,
    exclude_patterns: GlobSet,
}

impl GlobFilter {
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(extensions: &[&str], include: &[&str], exclude: &[&str]) -> Result<Self> {
        let include_patterns = if include.is_empty() {
            None
        } else {
            Some(build_set(include)?)
        };
        Ok(Self {
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
            include_patterns,
            exclude_patterns: build_set(exclude)?,
        })
    }

    /// Filter accepting files with one of `extensions`.
    ///
    /// # Errors
    /// Never fails in practice; kept fallible to share the constructor.
    pub fn with_extensions(extensions: &[&str]) -> Result<Self> {
        Self::new(extensions, &[], &[])
    }

    /// Filter accepting files whose relative path matches one of `patterns`.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn with_patterns(patterns: &[&str]) -> Result<Self> {
        Self::new(&[], patterns, &[])
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_included(&self, path: &Path) -> bool {
        self.include_patterns
            .as_ref()
            .is_none_or(|set| set.is_match(path))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_extension(path) && self.is_included(path) && !self.is_excluded(path)
    }
}

fn build_set(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ReadinessError::InvalidPattern {
            pattern: (*pattern).to_string(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ReadinessError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
