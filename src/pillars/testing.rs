use std::path::Path;

use super::CheckDef;
use super::probe::{Language, RepoProbe, found_in};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const TESTS_EXIST: CheckDef = CheckDef::new("Tests exist", 1, Severity::Required);
const TEST_DOCUMENTED: CheckDef =
    CheckDef::new("Test command documented", 2, Severity::Recommended);
const FRAMEWORK: CheckDef = CheckDef::new("Test framework configured", 2, Severity::Recommended);
const TESTS_IN_CI: CheckDef = CheckDef::new("Tests run in CI", 3, Severity::Recommended);
const COVERAGE: CheckDef = CheckDef::new("Coverage configured", 4, Severity::Optional);

const TEST_DIRS: &[&str] = &["tests", "test", "__tests__"];

const TEST_FILE_PATTERNS: &[&str] = &[
    "**/test_*.py",
    "**/*_test.py",
    "**/*_test.go",
    "**/*.test.js",
    "**/*.test.ts",
    "**/*.spec.js",
    "**/*.spec.ts",
];

const TEST_COMMANDS: &[&str] = &[
    "pytest",
    "cargo test",
    "npm test",
    "go test",
    "make test",
    "jest",
    "vitest",
];

const FRAMEWORK_FILES: &[&str] = &[
    "pytest.ini",
    "conftest.py",
    "jest.config.js",
    "jest.config.ts",
    "jest.config.mjs",
    "vitest.config.js",
    "vitest.config.ts",
    "vitest.config.mjs",
];

const COVERAGE_FILES: &[&str] = &[
    ".coveragerc",
    "codecov.yml",
    ".codecov.yml",
    "tarpaulin.toml",
    ".tarpaulin.toml",
];

const CI_COVERAGE_KEYWORDS: &[&str] = &["coverage", "llvm-cov", "tarpaulin", "codecov"];

const SOURCE_SAMPLE: usize = 200;

/// Presence and automation of the project's test suite.
pub struct TestingPillar;

impl Pillar for TestingPillar {
    fn name(&self) -> &str {
        "Testing"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let ci = probe.ci_text();

        Ok(vec![
            check_tests_exist(&probe),
            check_test_documented(&probe.docs_text()),
            check_framework(&probe),
            check_tests_in_ci(&probe, &ci),
            check_coverage(&probe, &ci),
        ])
    }
}

fn check_tests_exist(probe: &RepoProbe) -> CheckResult {
    if let Some(dir) = TEST_DIRS.iter().find(|d| probe.is_dir(d)) {
        return TESTS_EXIST.pass(format!("Test directory found: {dir}/"));
    }
    let named = probe.find_files(TEST_FILE_PATTERNS);
    if !named.is_empty() {
        return TESTS_EXIST.pass(format!("Found {} test files", named.len()));
    }
    let inline = probe
        .source_texts(&["rs"], SOURCE_SAMPLE)
        .into_iter()
        .any(|(_, text)| text.contains("#[cfg(test)]"));
    if inline {
        return TESTS_EXIST.pass("Inline Rust test modules found");
    }
    TESTS_EXIST.fail("No tests found (tests/ directory or test files)")
}

fn check_test_documented(docs: &str) -> CheckResult {
    let commands = found_in(docs, TEST_COMMANDS);
    if commands.is_empty() {
        TEST_DOCUMENTED.fail("Test command not documented in README or AGENTS.md")
    } else {
        TEST_DOCUMENTED.pass(format!("Test command documented: {}", commands.join(", ")))
    }
}

fn check_framework(probe: &RepoProbe) -> CheckResult {
    if let Some(file) = probe.first_existing(FRAMEWORK_FILES) {
        return FRAMEWORK.pass(format!("Test framework configured: {file}"));
    }
    if probe
        .pyproject_lower()
        .is_some_and(|p| p.contains("[tool.pytest"))
    {
        return FRAMEWORK.pass("Test framework configured: pyproject.toml [tool.pytest]");
    }
    let has_test_script = probe
        .read_json("package.json")
        .is_some_and(|pkg| pkg.pointer("/scripts/test").is_some());
    if has_test_script {
        return FRAMEWORK.pass("Test framework configured: package.json test script");
    }
    let builtin = probe
        .languages()
        .into_iter()
        .find(|l| matches!(l, Language::Rust | Language::Go));
    if let Some(lang) = builtin {
        return FRAMEWORK.pass(format!("Built-in test framework: {lang}"));
    }
    FRAMEWORK.fail("No test framework configured (pytest, jest, vitest, or a built-in runner)")
}

fn check_tests_in_ci(probe: &RepoProbe, ci: &str) -> CheckResult {
    if probe.ci_files().is_empty() {
        return TESTS_IN_CI.fail("No CI configuration found");
    }
    let commands = found_in(ci, TEST_COMMANDS);
    if !commands.is_empty() {
        TESTS_IN_CI.pass(format!("Tests run in CI: {}", commands.join(", ")))
    } else if ci.contains("test") {
        TESTS_IN_CI.pass("CI configuration mentions tests")
    } else {
        TESTS_IN_CI.fail("CI configuration does not run tests")
    }
}

fn check_coverage(probe: &RepoProbe, ci: &str) -> CheckResult {
    if let Some(file) = probe.first_existing(COVERAGE_FILES) {
        return COVERAGE.pass(format!("Coverage configured: {file}"));
    }
    if probe
        .pyproject_lower()
        .is_some_and(|p| p.contains("[tool.coverage"))
    {
        return COVERAGE.pass("Coverage configured: pyproject.toml [tool.coverage]");
    }
    let tools = found_in(ci, CI_COVERAGE_KEYWORDS);
    if tools.is_empty() {
        COVERAGE.fail("No coverage configuration found")
    } else {
        COVERAGE.pass(format!("Coverage collected in CI: {}", tools.join(", ")))
    }
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
