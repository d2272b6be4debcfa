use std::path::Path;

use super::CheckDef;
use super::probe::{RepoProbe, contains_any, found_in};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const MANIFEST: CheckDef = CheckDef::new("Build manifest exists", 1, Severity::Required);
const LOCK_FILE: CheckDef =
    CheckDef::new("Dependency lock file present", 2, Severity::Recommended);
const BUILD_DOCUMENTED: CheckDef =
    CheckDef::new("Build command documented", 2, Severity::Recommended);
const TASK_RUNNER: CheckDef = CheckDef::new("Task runner configured", 3, Severity::Optional);
const CI_BUILD: CheckDef = CheckDef::new("CI build workflow", 3, Severity::Recommended);
const TOOLCHAIN: CheckDef =
    CheckDef::new("Reproducible toolchain pinned", 4, Severity::Optional);

const MANIFEST_FILES: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "setup.py",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "CMakeLists.txt",
    "Makefile",
];

const LOCK_FILES: &[&str] = &[
    "Cargo.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "uv.lock",
    "go.sum",
    "Pipfile.lock",
];

const BUILD_COMMANDS: &[&str] = &[
    "cargo build",
    "npm run build",
    "make",
    "go build",
    "python -m build",
    "pip install",
];

const TOOLCHAIN_FILES: &[&str] = &[
    "rust-toolchain",
    "rust-toolchain.toml",
    ".nvmrc",
    ".node-version",
    ".python-version",
    ".tool-versions",
];

const TASK_RUNNER_FILES: &[&str] = &[
    "Makefile",
    "justfile",
    "Justfile",
    "Taskfile.yml",
    "tox.ini",
    "noxfile.py",
];

const CI_BUILD_KEYWORDS: &[&str] = &["build", "compile"];

/// Whether the project can be built reproducibly from a fresh checkout.
pub struct BuildPillar;

impl Pillar for BuildPillar {
    fn name(&self) -> &str {
        "Build System"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let docs = probe.docs_text();

        Ok(vec![
            check_manifest(&probe),
            check_lock_file(&probe),
            check_build_documented(&docs),
            check_task_runner(&probe),
            check_ci_build(&probe),
            check_toolchain(&probe),
        ])
    }
}

fn check_manifest(probe: &RepoProbe) -> CheckResult {
    let found = probe.existing(MANIFEST_FILES);
    if found.is_empty() {
        MANIFEST.fail("No build manifest found (Cargo.toml, package.json, pyproject.toml, ...)")
    } else {
        MANIFEST.pass(format!("Build manifest found: {}", found.join(", ")))
    }
}

fn check_lock_file(probe: &RepoProbe) -> CheckResult {
    match probe.first_existing(LOCK_FILES) {
        Some(file) => LOCK_FILE.pass(format!("Lock file found: {file}")),
        None => LOCK_FILE.fail("No dependency lock file found"),
    }
}

fn check_build_documented(docs: &str) -> CheckResult {
    if docs.is_empty() {
        return BUILD_DOCUMENTED.fail("No README or AGENTS.md to document the build");
    }
    let commands = found_in(docs, BUILD_COMMANDS);
    if commands.is_empty() {
        BUILD_DOCUMENTED.fail("Build command not documented in README or AGENTS.md")
    } else {
        BUILD_DOCUMENTED.pass(format!("Build command documented: {}", commands.join(", ")))
    }
}

fn check_task_runner(probe: &RepoProbe) -> CheckResult {
    if let Some(file) = probe.first_existing(TASK_RUNNER_FILES) {
        return TASK_RUNNER.pass(format!("Task runner configured: {file}"));
    }
    let has_scripts = probe
        .read_json("package.json")
        .and_then(|pkg| pkg.get("scripts")?.as_object().map(|s| !s.is_empty()))
        .unwrap_or(false);
    if has_scripts {
        return TASK_RUNNER.pass("Task runner configured: package.json scripts");
    }
    TASK_RUNNER.fail("No task runner found (Makefile, justfile, Taskfile, npm scripts)")
}

fn check_ci_build(probe: &RepoProbe) -> CheckResult {
    if probe.ci_files().is_empty() {
        return CI_BUILD.fail("No CI configuration found");
    }
    if contains_any(&probe.ci_text(), CI_BUILD_KEYWORDS) {
        CI_BUILD.pass("CI workflow builds the project")
    } else {
        CI_BUILD.fail("CI configuration found but no build step")
    }
}

fn check_toolchain(probe: &RepoProbe) -> CheckResult {
    match probe.first_existing(TOOLCHAIN_FILES) {
        Some(file) => TOOLCHAIN.pass(format!("Toolchain pinned: {file}")),
        None => TOOLCHAIN.fail("No toolchain version file found"),
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
