use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::filter::FileFilter;

/// Directory names never descended into while probing a repository.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "venv",
    ".venv",
    "env",
    ".git",
    "dist",
    "build",
    "target",
    "__pycache__",
];

#[must_use]
pub fn is_ignored_dir_name(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Collects files under a root in file-name order, pruning [`IGNORED_DIRS`].
///
/// Filters see paths relative to the root; returned paths are absolute.
pub struct RepoWalker<F: FileFilter> {
    filter: F,
    use_gitignore: bool,
    limit: Option<usize>,
}

impl<F: FileFilter> RepoWalker<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            use_gitignore: false,
            limit: None,
        }
    }

    #[must_use]
    pub const fn with_gitignore(filter: F, use_gitignore: bool) -> Self {
        Self {
            filter,
            use_gitignore,
            limit: None,
        }
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn walk(&self, root: &Path) -> Vec<PathBuf> {
        if self.use_gitignore {
            self.walk_with_gitignore(root)
        } else {
            self.walk_without_gitignore(root)
        }
    }

    fn walk_without_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        let files = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_pruned(e.file_type().is_dir(), e.file_name()))
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && self.accepts(root, e.path()))
            .map(walkdir::DirEntry::into_path);
        self.take(files)
    }

    fn walk_with_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        use ignore::WalkBuilder;

        let files = WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|e| {
                e.depth() == 0
                    || !is_pruned(e.file_type().is_some_and(|ft| ft.is_dir()), e.file_name())
            })
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| self.accepts(root, e.path()))
            .map(ignore::DirEntry::into_path);
        self.take(files)
    }

    fn accepts(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.filter.should_include(relative)
    }

    fn take(&self, files: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
        match self.limit {
            Some(limit) => files.take(limit).collect(),
            None => files.collect(),
        }
    }
}

fn is_pruned(is_dir: bool, name: &std::ffi::OsStr) -> bool {
    is_dir && name.to_str().is_some_and(is_ignored_dir_name)
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
