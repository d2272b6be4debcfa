use std::path::Path;

use indexmap::IndexSet;

use super::CheckDef;
use super::probe::{Language, RepoProbe, contains_any};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const LINTER: CheckDef = CheckDef::new("Linter configured", 1, Severity::Required);
const FORMATTER: CheckDef = CheckDef::new("Formatter configured", 1, Severity::Required);
const TYPE_CHECKING: CheckDef =
    CheckDef::new("Type checking configured", 2, Severity::Recommended);
const EDITOR_CONFIG: CheckDef = CheckDef::new("Editor config present", 2, Severity::Optional);
const LINT_HOOKS: CheckDef = CheckDef::new("Lint hooks automated", 3, Severity::Recommended);

const LINTER_FILES: &[&str] = &[
    "ruff.toml",
    ".ruff.toml",
    ".flake8",
    ".pylintrc",
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.json",
    ".eslintrc.yml",
    ".eslintrc.yaml",
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
    "eslint.config.ts",
    ".golangci.yml",
    ".golangci.yaml",
    "clippy.toml",
    ".clippy.toml",
];

const FORMATTER_FILES: &[&str] = &[
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.js",
    ".prettierrc.yml",
    ".prettierrc.yaml",
    "prettier.config.js",
    "rustfmt.toml",
    ".rustfmt.toml",
];

const TYPE_CHECK_FILES: &[&str] = &["mypy.ini", ".mypy.ini", "pyrightconfig.json", "tsconfig.json"];

const NO_LANGUAGE: &str = "no supported language found (python, javascript, go, rust)";

const LINT_CI_KEYWORDS: &[&str] = &["lint", "fmt", "clippy", "ruff", "eslint", "prettier", "black"];

/// Code style enforcement and static validation tooling.
pub struct StylePillar;

impl Pillar for StylePillar {
    fn name(&self) -> &str {
        "Style & Validation"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let languages = probe.languages();
        let pyproject = probe.pyproject_lower().unwrap_or_default();

        Ok(vec![
            check_linter(&probe, &languages, &pyproject),
            check_formatter(&probe, &languages, &pyproject),
            check_type_checking(&probe, &languages, &pyproject),
            check_editor_config(&probe),
            check_lint_hooks(&probe),
        ])
    }
}

fn language_list(languages: &IndexSet<Language>) -> String {
    languages
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_linter(
    probe: &RepoProbe,
    languages: &IndexSet<Language>,
    pyproject: &str,
) -> CheckResult {
    if languages.is_empty() {
        return LINTER.fail(format!("No linter evaluated: {NO_LANGUAGE}"));
    }
    if let Some(file) = probe.first_existing(LINTER_FILES) {
        return LINTER.pass(format!("Linter configured: {file}"));
    }
    if pyproject.contains("[tool.ruff") {
        return LINTER.pass("Linter configured: pyproject.toml [tool.ruff]");
    }
    if languages.contains(&Language::Rust) {
        return LINTER.pass("Linter available: clippy built-in for rust");
    }
    LINTER.fail(format!(
        "No linter configuration found for {}",
        language_list(languages)
    ))
}

fn check_formatter(
    probe: &RepoProbe,
    languages: &IndexSet<Language>,
    pyproject: &str,
) -> CheckResult {
    if languages.is_empty() {
        return FORMATTER.fail(format!("No formatter evaluated: {NO_LANGUAGE}"));
    }
    if let Some(file) = probe.first_existing(FORMATTER_FILES) {
        return FORMATTER.pass(format!("Formatter configured: {file}"));
    }
    if pyproject.contains("[tool.black") {
        return FORMATTER.pass("Formatter configured: pyproject.toml [tool.black]");
    }
    if pyproject.contains("[tool.ruff.format") || pyproject.contains("[tool.ruff]") {
        return FORMATTER.pass("Formatter configured: ruff format");
    }
    if languages.contains(&Language::Go) {
        return FORMATTER.pass("Formatter available: gofmt built-in");
    }
    FORMATTER.fail(format!(
        "No formatter configuration found for {}",
        language_list(languages)
    ))
}

fn check_type_checking(
    probe: &RepoProbe,
    languages: &IndexSet<Language>,
    pyproject: &str,
) -> CheckResult {
    if let Some(file) = probe.first_existing(TYPE_CHECK_FILES) {
        return TYPE_CHECKING.pass(format!("Type checker configured: {file}"));
    }
    if pyproject.contains("[tool.mypy") || pyproject.contains("[tool.pyright") {
        return TYPE_CHECKING.pass("Type checker configured in pyproject.toml");
    }
    if let Some(lang) = languages.iter().find(|l| l.is_statically_typed()) {
        return TYPE_CHECKING.pass(format!("Statically typed language: {lang}"));
    }
    TYPE_CHECKING.fail("No type checking configured (mypy, pyright, tsconfig.json)")
}

fn check_editor_config(probe: &RepoProbe) -> CheckResult {
    if probe.is_file(".editorconfig") {
        EDITOR_CONFIG.pass("Editor config found: .editorconfig")
    } else {
        EDITOR_CONFIG.fail("No .editorconfig found")
    }
}

fn check_lint_hooks(probe: &RepoProbe) -> CheckResult {
    if probe.is_file(".pre-commit-config.yaml") {
        return LINT_HOOKS.pass("Pre-commit hooks configured: .pre-commit-config.yaml");
    }
    if probe.is_dir(".husky") {
        return LINT_HOOKS.pass("Git hooks configured: .husky/");
    }
    if contains_any(&probe.ci_text(), LINT_CI_KEYWORDS) {
        return LINT_HOOKS.pass("Linting runs in CI");
    }
    LINT_HOOKS.fail("Linting is not automated (no pre-commit, husky, or CI lint step)")
}

#[cfg(test)]
#[path = "style_tests.rs"]
mod tests;
