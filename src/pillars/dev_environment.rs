use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use super::CheckDef;
use super::probe::{RepoProbe, contains_any};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const SETUP_INSTRUCTIONS: CheckDef =
    CheckDef::new("Setup instructions exist", 1, Severity::Required);
const DEPENDENCY_FILE: CheckDef = CheckDef::new("Dependency file exists", 1, Severity::Required);
const ENV_EXAMPLE: CheckDef = CheckDef::new(".env.example exists", 2, Severity::Recommended);
const SETUP_STEPS: CheckDef = CheckDef::new("Setup steps documented", 2, Severity::Recommended);
const DEPENDENCY_GROUPS: CheckDef =
    CheckDef::new("Dependency groups documented", 2, Severity::Optional);
const PYTHON_REQUIREMENTS: CheckDef =
    CheckDef::new("Python requirements documented", 2, Severity::Optional);
const DEVCONTAINER: CheckDef = CheckDef::new("Devcontainer configured", 3, Severity::Recommended);
const DOCKERFILE: CheckDef = CheckDef::new("Dockerfile configured", 3, Severity::Optional);
const VERSION_PINNING: CheckDef =
    CheckDef::new("Version pinning configured", 3, Severity::Recommended);
const SETUP_SCRIPT: CheckDef = CheckDef::new("Setup script available", 3, Severity::Optional);
const DEVCONTAINER_EXTENSIONS: CheckDef =
    CheckDef::new("Devcontainer extensions configured", 4, Severity::Optional);
const ENV_VALIDATION: CheckDef =
    CheckDef::new("Environment validation available", 4, Severity::Optional);
const QUICK_START: CheckDef =
    CheckDef::new("Quick-start instructions available", 4, Severity::Optional);
const IDE_EXTENSIONS: CheckDef = CheckDef::new("IDE extensions documented", 4, Severity::Optional);
const PRE_COMMIT: CheckDef = CheckDef::new("Pre-commit hooks configured", 5, Severity::Optional);
const ENV_MONITORING: CheckDef =
    CheckDef::new("Environment monitoring available", 5, Severity::Optional);
const AUTO_SETUP: CheckDef =
    CheckDef::new("Auto setup on clone configured", 5, Severity::Optional);
const CONTAINERIZED_CI: CheckDef =
    CheckDef::new("Containerized CI configured", 5, Severity::Optional);

const DEPENDENCY_FILES: &[(&str, &[&str])] = &[
    ("python", &["pyproject.toml", "setup.py", "requirements.txt"]),
    ("node", &["package.json"]),
    ("rust", &["Cargo.toml"]),
    ("go", &["go.mod"]),
];

const ENV_EXAMPLE_FILES: &[&str] = &[".env.example", ".env.sample", ".env.template"];
const DEVCONTAINER_PATH: &str = ".devcontainer/devcontainer.json";
const PIN_FILES: &[&str] = &[
    "poetry.lock",
    "uv.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "go.sum",
    "Cargo.lock",
];

const MIN_ENV_EXAMPLE_BYTES: u64 = 20;
const MIN_SCRIPT_BYTES: usize = 100;
const MIN_PRE_COMMIT_REPOS: usize = 2;

static QUICK_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(quick.?start|get(ting)? started).{0,400}```|```[^`]*git clone[^`]*&&[^`]*cd")
        .expect("Invalid regex")
});

/// Reproducibility and ergonomics of the local development environment.
pub struct DevEnvironmentPillar;

/// Assets several dev-environment checks share.
struct DevEnv {
    docs: String,
    dependency_files: IndexMap<&'static str, &'static str>,
    makefile: Option<String>,
    devcontainer: Option<Value>,
    has_devcontainer: bool,
}

impl DevEnv {
    fn discover(probe: &RepoProbe) -> Self {
        let dependency_files = DEPENDENCY_FILES
            .iter()
            .filter_map(|(lang, files)| probe.first_existing(files).map(|f| (*lang, f)))
            .collect();
        Self {
            docs: probe.docs_text(),
            dependency_files,
            makefile: probe.read("Makefile"),
            devcontainer: probe.read_json(DEVCONTAINER_PATH),
            has_devcontainer: probe.is_file(DEVCONTAINER_PATH),
        }
    }

    fn makefile_mentions(&self, words: &[&str]) -> bool {
        self.makefile
            .as_deref()
            .is_some_and(|m| contains_any(m, words))
    }
}

impl Pillar for DevEnvironmentPillar {
    fn name(&self) -> &str {
        "Dev Environment"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let env = DevEnv::discover(&probe);

        Ok(vec![
            check_setup_instructions(&env),
            check_dependency_file(&env),
            check_env_example(&probe),
            check_setup_steps(&env),
            check_dependency_groups(&probe, &env),
            check_python_requirements(&probe, &env),
            check_devcontainer(&env),
            check_dockerfile(&probe),
            check_version_pinning(&probe),
            check_setup_script(&probe, &env),
            check_devcontainer_extensions(&env),
            check_env_validation(&probe, &env),
            check_quick_start(&probe, &env),
            check_ide_extensions(&probe, &env),
            check_pre_commit(&probe),
            check_env_monitoring(&probe),
            check_auto_setup(&probe),
            check_containerized_ci(&probe),
        ])
    }
}

fn check_setup_instructions(env: &DevEnv) -> CheckResult {
    let keywords = ["install", "setup", "develop", "getting started", "quick start"];
    if env.docs.len() > 50 && contains_any(&env.docs, &keywords) {
        SETUP_INSTRUCTIONS.pass("Setup instructions found in README or AGENTS.md")
    } else {
        SETUP_INSTRUCTIONS.fail("No clear setup instructions found in README or AGENTS.md")
    }
}

fn check_dependency_file(env: &DevEnv) -> CheckResult {
    match env.dependency_files.values().next() {
        Some(file) => DEPENDENCY_FILE.pass(format!("Dependency file found: {file}")),
        None => DEPENDENCY_FILE
            .fail("No dependency file found (pyproject.toml, package.json, Cargo.toml, go.mod)"),
    }
}

fn check_env_example(probe: &RepoProbe) -> CheckResult {
    let documented = ENV_EXAMPLE_FILES.iter().find(|f| {
        std::fs::metadata(probe.path(f)).is_ok_and(|m| m.len() >= MIN_ENV_EXAMPLE_BYTES)
    });
    match documented {
        Some(file) => ENV_EXAMPLE.pass(format!("{file} found with documented variables")),
        None => ENV_EXAMPLE.fail("No .env.example file found"),
    }
}

fn check_setup_steps(env: &DevEnv) -> CheckResult {
    let commands = [
        "pip install",
        "npm install",
        "cargo build",
        "go get",
        "go mod download",
        "python -m",
        "make install",
    ];
    if env.docs.len() > 100 && contains_any(&env.docs, &commands) {
        SETUP_STEPS.pass("Setup steps clearly documented with commands")
    } else {
        SETUP_STEPS.fail("Setup steps not clearly documented with specific commands")
    }
}

fn check_dependency_groups(probe: &RepoProbe, env: &DevEnv) -> CheckResult {
    let python = match env.dependency_files.get("python") {
        Some(&"pyproject.toml") => probe.read("pyproject.toml").is_some_and(|p| {
            contains_any(
                &p,
                &["[tool.poetry.group", "[project.optional-dependencies]", "[dependency-groups]"],
            )
        }),
        Some(_) => probe.exists("requirements-dev.txt"),
        None => false,
    };
    let node = probe
        .read_json("package.json")
        .is_some_and(|pkg| pkg.get("devDependencies").is_some());
    let rust = probe
        .read_toml("Cargo.toml")
        .is_some_and(|cargo| cargo.contains_key("dev-dependencies"));

    if python || node || rust {
        DEPENDENCY_GROUPS.pass("Development dependencies properly separated")
    } else {
        DEPENDENCY_GROUPS.fail("Development dependencies not clearly separated")
    }
}

fn check_python_requirements(probe: &RepoProbe, env: &DevEnv) -> CheckResult {
    let Some(file) = env.dependency_files.get("python") else {
        return PYTHON_REQUIREMENTS.pass("Not a Python project");
    };
    let content = probe.read(file).unwrap_or_default();
    let documented = match *file {
        "pyproject.toml" => contains_any(&content, &["[project]", "[tool.poetry]"]),
        "requirements.txt" => !content.trim().is_empty(),
        _ => content.contains("install_requires"),
    };
    if documented {
        PYTHON_REQUIREMENTS.pass(format!("Python requirements documented in {file}"))
    } else {
        PYTHON_REQUIREMENTS.fail("Python requirements not properly documented")
    }
}

fn check_devcontainer(env: &DevEnv) -> CheckResult {
    match &env.devcontainer {
        Some(data) if data.get("image").is_some() || data.get("build").is_some() => {
            DEVCONTAINER.pass("Devcontainer configuration found")
        }
        Some(_) => DEVCONTAINER.fail("devcontainer.json defines neither an image nor a build"),
        None if env.has_devcontainer => {
            DEVCONTAINER.fail("devcontainer.json could not be parsed")
        }
        None => DEVCONTAINER.fail("No .devcontainer/devcontainer.json found"),
    }
}

fn check_dockerfile(probe: &RepoProbe) -> CheckResult {
    let has_from = probe
        .read("Dockerfile")
        .is_some_and(|d| d.to_uppercase().contains("FROM"));
    if has_from {
        DOCKERFILE.pass("Dockerfile found")
    } else {
        DOCKERFILE.fail("No Dockerfile found")
    }
}

fn check_version_pinning(probe: &RepoProbe) -> CheckResult {
    if let Some(file) = probe.first_existing(PIN_FILES) {
        return VERSION_PINNING.pass(format!("Dependency versions pinned via {file}"));
    }
    let pinned_requirements = probe
        .read("requirements.txt")
        .is_some_and(|r| r.lines().any(|l| l.contains("==")));
    if pinned_requirements {
        return VERSION_PINNING.pass("Dependency versions pinned in requirements.txt");
    }
    VERSION_PINNING.fail("No dependency lock file found")
}

fn check_setup_script(probe: &RepoProbe, env: &DevEnv) -> CheckResult {
    for script in ["setup.sh", "scripts/setup.sh", "bootstrap.sh", "scripts/bootstrap"] {
        if probe.read(script).is_some_and(|s| s.len() > MIN_SCRIPT_BYTES) {
            return SETUP_SCRIPT.pass(format!("Setup script found: {script}"));
        }
    }
    if env.makefile_mentions(&["dev", "install", "setup"]) {
        return SETUP_SCRIPT.pass("Makefile with setup targets found");
    }
    SETUP_SCRIPT.fail("No automated setup script found")
}

fn check_devcontainer_extensions(env: &DevEnv) -> CheckResult {
    let Some(data) = &env.devcontainer else {
        return DEVCONTAINER_EXTENSIONS.fail("No devcontainer found");
    };
    let extensions: Vec<String> = data
        .pointer("/customizations/vscode/extensions")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default();
    let keywords = ["ruff", "prettier", "eslint", "python", "docker", "rust-analyzer", "go"];
    let has_dev_extension = extensions.iter().any(|e| contains_any(e, &keywords));
    if has_dev_extension || extensions.len() >= 3 {
        DEVCONTAINER_EXTENSIONS.pass(format!(
            "Devcontainer configured with {} extensions",
            extensions.len()
        ))
    } else {
        DEVCONTAINER_EXTENSIONS.fail("Devcontainer lacks development extensions")
    }
}

fn check_env_validation(probe: &RepoProbe, env: &DevEnv) -> CheckResult {
    for script in ["verify.sh", "validate.sh", "check-env.sh", "scripts/check-env.sh"] {
        if probe.read(script).is_some_and(|s| s.len() > MIN_SCRIPT_BYTES) {
            return ENV_VALIDATION.pass(format!("Validation script found: {script}"));
        }
    }
    if env.makefile_mentions(&["validate", "check-env", "doctor"]) {
        return ENV_VALIDATION.pass("Makefile validation target found");
    }
    ENV_VALIDATION.fail("No environment validation script found")
}

fn check_quick_start(probe: &RepoProbe, env: &DevEnv) -> CheckResult {
    if QUICK_START_RE.is_match(&env.docs) {
        return QUICK_START.pass("Quick-start setup documented");
    }
    if probe.exists("quick-start.sh") {
        return QUICK_START.pass("Quick-start script found");
    }
    QUICK_START.fail("No quick-start command documented")
}

fn check_ide_extensions(probe: &RepoProbe, env: &DevEnv) -> CheckResult {
    if probe.is_file(".vscode/extensions.json") {
        return IDE_EXTENSIONS.pass("VS Code extensions.json found");
    }
    if contains_any(&env.docs, &["vs code", "vscode", "extension", "editor"]) {
        return IDE_EXTENSIONS.pass("IDE extension recommendations found");
    }
    IDE_EXTENSIONS.fail("No IDE extension recommendations found")
}

fn check_pre_commit(probe: &RepoProbe) -> CheckResult {
    let Some(config) = probe.read(".pre-commit-config.yaml") else {
        return PRE_COMMIT.fail("No .pre-commit-config.yaml found");
    };
    let repos = config
        .lines()
        .filter(|l| l.trim_start().starts_with("- repo:"))
        .count();
    if repos >= MIN_PRE_COMMIT_REPOS {
        PRE_COMMIT.pass(format!("Pre-commit hooks configured with {repos} repos"))
    } else {
        PRE_COMMIT.fail(format!(
            "Pre-commit configuration incomplete ({repos} repos, need {MIN_PRE_COMMIT_REPOS})"
        ))
    }
}

fn check_env_monitoring(probe: &RepoProbe) -> CheckResult {
    for script in ["monitor.sh", "health-check.sh", "check-health.sh"] {
        if probe.read(script).is_some_and(|s| s.len() > MIN_SCRIPT_BYTES) {
            return ENV_MONITORING.pass(format!("Monitoring script found: {script}"));
        }
    }
    ENV_MONITORING.fail("No environment monitoring script found")
}

fn check_auto_setup(probe: &RepoProbe) -> CheckResult {
    for hook in [".git/hooks/post-checkout", ".git/hooks/post-merge", ".husky/post-checkout"] {
        if probe.is_file(hook) {
            return AUTO_SETUP.pass(format!("Clone hook found: {hook}"));
        }
    }
    if probe
        .read(DEVCONTAINER_PATH)
        .is_some_and(|d| d.contains("postCreateCommand"))
    {
        return AUTO_SETUP.pass("Devcontainer runs postCreateCommand");
    }
    AUTO_SETUP.fail("No automatic setup on clone configured")
}

fn check_containerized_ci(probe: &RepoProbe) -> CheckResult {
    let containerized = probe.ci_files().iter().any(|path| {
        probe.read_path(path).is_some_and(|text| {
            let lower = text.to_lowercase();
            contains_any(&lower, &["container:", "docker", "image:"])
        })
    });
    if containerized {
        CONTAINERIZED_CI.pass("CI uses containerized environment")
    } else {
        CONTAINERIZED_CI.fail("CI does not use containerized environment")
    }
}

#[cfg(test)]
#[path = "dev_environment_tests.rs"]
mod tests;
