//! Read-only filesystem helpers shared by the built-in pillars.
//!
//! Every helper degrades to `None`/empty on I/O or parse failure and logs the cause at
//! `debug`, so a broken file only affects the check that wanted it.

mod filter;
mod walker;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::debug;

pub use filter::{FileFilter, GlobFilter};
pub use walker::{IGNORED_DIRS, RepoWalker, is_ignored_dir_name};

/// Files larger than this are skipped when reading contents.
pub const MAX_READ_BYTES: u64 = 2 * 1024 * 1024;

pub const README_NAMES: &[&str] = &["README.md", "README.rst", "README.txt", "README"];

pub const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "ts", "jsx", "tsx", "go", "rs"];

const CI_PATTERNS: &[&str] = &[
    ".github/workflows/*.yml",
    ".github/workflows/*.yaml",
    ".gitlab-ci.yml",
    ".circleci/config.yml",
    "azure-pipelines.yml",
    "Jenkinsfile",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Go,
    JavaScript,
    Python,
    Rust,
}

impl Language {
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Self::Python),
            "js" | "ts" | "jsx" | "tsx" => Some(Self::JavaScript),
            "go" => Some(Self::Go),
            "rs" => Some(Self::Rust),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Rust => "rust",
        }
    }

    /// Languages whose compiler already enforces types.
    #[must_use]
    pub const fn is_statically_typed(self) -> bool {
        matches!(self, Self::Go | Self::Rust)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view of one repository root.
pub struct RepoProbe {
    root: PathBuf,
}

impl RepoProbe {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    #[must_use]
    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    #[must_use]
    pub fn is_dir(&self, rel: &str) -> bool {
        self.path(rel).is_dir()
    }

    #[must_use]
    pub fn is_file(&self, rel: &str) -> bool {
        self.path(rel).is_file()
    }

    /// The first of `candidates` that exists under the root.
    #[must_use]
    pub fn first_existing<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.exists(c))
    }

    /// Every one of `candidates` that exists under the root, in the given order.
    #[must_use]
    pub fn existing<'a>(&self, candidates: &[&'a str]) -> Vec<&'a str> {
        candidates.iter().copied().filter(|c| self.exists(c)).collect()
    }

    #[must_use]
    pub fn read(&self, rel: &str) -> Option<String> {
        read_lossy(&self.path(rel))
    }

    #[must_use]
    pub fn read_lower(&self, rel: &str) -> Option<String> {
        self.read(rel).map(|s| s.to_lowercase())
    }

    #[must_use]
    pub fn read_path(&self, path: &Path) -> Option<String> {
        read_lossy(path)
    }

    /// Parse `rel` as JSON. Missing and malformed files both yield `None`.
    #[must_use]
    pub fn read_json(&self, rel: &str) -> Option<serde_json::Value> {
        let text = self.read(rel)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(file = rel, error = %e, "ignoring malformed JSON");
                None
            }
        }
    }

    /// Parse `rel` as TOML. Missing and malformed files both yield `None`.
    #[must_use]
    pub fn read_toml(&self, rel: &str) -> Option<toml::Table> {
        let text = self.read(rel)?;
        match text.parse::<toml::Table>() {
            Ok(table) => Some(table),
            Err(e) => {
                debug!(file = rel, error = %e, "ignoring malformed TOML");
                None
            }
        }
    }

    /// Find a root-level file whose name matches one of `names`, ignoring case.
    ///
    /// Exact matches win over case-insensitive ones; returns the on-disk name.
    #[must_use]
    pub fn find_root_file_ci(&self, names: &[&str]) -> Option<String> {
        let files: Vec<String> = self
            .root_entries()
            .into_iter()
            .filter(|(_, is_dir)| !is_dir)
            .map(|(name, _)| name)
            .collect();
        names.iter().find_map(|name| {
            files
                .iter()
                .find(|f| f.as_str() == *name)
                .or_else(|| files.iter().find(|f| f.eq_ignore_ascii_case(name)))
                .cloned()
        })
    }

    /// Non-hidden directories directly under the root, sorted by name.
    #[must_use]
    pub fn root_subdirs(&self) -> Vec<String> {
        self.root_entries()
            .into_iter()
            .filter(|(name, is_dir)| *is_dir && !name.starts_with('.'))
            .map(|(name, _)| name)
            .collect()
    }

    fn root_entries(&self) -> Vec<(String, bool)> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.root.display(), error = %e, "cannot list directory");
                return Vec::new();
            }
        };
        let mut names: Vec<(String, bool)> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|ft| ft.is_dir());
                (e.file_name().to_string_lossy().into_owned(), is_dir)
            })
            .collect();
        names.sort();
        names
    }

    /// Files matching any of `patterns` (root-relative globs), including gitignored ones.
    ///
    /// Invalid patterns match nothing.
    #[must_use]
    pub fn find_files(&self, patterns: &[&str]) -> Vec<PathBuf> {
        match GlobFilter::with_patterns(patterns) {
            Ok(filter) => RepoWalker::new(filter).walk(&self.root),
            Err(e) => {
                debug!(error = %e, "skipping invalid probe pattern");
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn has_files(&self, patterns: &[&str]) -> bool {
        !self.find_files(patterns).is_empty()
    }

    /// Tracked source files with one of `extensions`, honouring `.gitignore`.
    #[must_use]
    pub fn source_files(&self, extensions: &[&str], limit: usize) -> Vec<PathBuf> {
        match GlobFilter::with_extensions(extensions) {
            Ok(filter) => RepoWalker::with_gitignore(filter, true)
                .with_limit(limit)
                .walk(&self.root),
            Err(e) => {
                debug!(error = %e, "skipping invalid extension filter");
                Vec::new()
            }
        }
    }

    /// Lowercased contents of up to `limit` source files.
    #[must_use]
    pub fn source_texts(&self, extensions: &[&str], limit: usize) -> Vec<(PathBuf, String)> {
        self.source_files(extensions, limit)
            .into_iter()
            .filter_map(|path| {
                let text = read_lossy(&path)?.to_lowercase();
                Some((path, text))
            })
            .collect()
    }

    /// Languages present among tracked source files, in a stable order.
    #[must_use]
    pub fn languages(&self) -> IndexSet<Language> {
        let mut found: Vec<Language> = self
            .source_files(SOURCE_EXTENSIONS, usize::MAX)
            .iter()
            .filter_map(|p| p.extension().and_then(|e| e.to_str()))
            .filter_map(Language::from_extension)
            .collect();
        found.sort();
        found.into_iter().collect()
    }

    /// Lowercased README, located case-insensitively.
    #[must_use]
    pub fn readme_lower(&self) -> Option<String> {
        let name = self.find_root_file_ci(README_NAMES)?;
        self.read_lower(&name)
    }

    #[must_use]
    pub fn agents_lower(&self) -> Option<String> {
        self.read_lower("AGENTS.md")
    }

    /// README and AGENTS.md together, lowercased. Empty when neither exists.
    #[must_use]
    pub fn docs_text(&self) -> String {
        let mut text = self.readme_lower().unwrap_or_default();
        if let Some(agents) = self.agents_lower() {
            text.push('\n');
            text.push_str(&agents);
        }
        text
    }

    #[must_use]
    pub fn ci_files(&self) -> Vec<PathBuf> {
        self.find_files(CI_PATTERNS)
    }

    /// Every CI configuration file concatenated and lowercased.
    #[must_use]
    pub fn ci_text(&self) -> String {
        self.ci_files()
            .iter()
            .filter_map(|p| read_lossy(p))
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn pyproject_lower(&self) -> Option<String> {
        self.read_lower("pyproject.toml")
    }

    /// Root-relative display form of `path`.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

fn read_lossy(path: &Path) -> Option<String> {
    let meta = fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    if meta.len() > MAX_READ_BYTES {
        debug!(path = %path.display(), size = meta.len(), "skipping oversized file");
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read file");
            None
        }
    }
}

/// True when `text` contains any of `needles`.
#[must_use]
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// The subset of `needles` found in `text`, in order.
#[must_use]
pub fn found_in<'a>(text: &str, needles: &[&'a str]) -> Vec<&'a str> {
    needles.iter().copied().filter(|n| text.contains(n)).collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
