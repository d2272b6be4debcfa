use std::fs;

use tempfile::TempDir;

use super::*;

fn repo(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = temp_dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp_dir
}

fn check<'a>(checks: &'a [CheckResult], name: &str) -> &'a CheckResult {
    checks.iter().find(|c| c.name() == name).unwrap()
}

#[test]
fn empty_repo_fails_everything() {
    let temp_dir = repo(&[]);
    let checks = BuildPillar.evaluate(temp_dir.path()).unwrap();

    assert_eq!(checks.len(), 6);
    assert!(checks.iter().all(CheckResult::is_failed));
}

#[test]
fn rust_project_is_buildable() {
    let temp_dir = repo(&[
        ("Cargo.toml", "[package]\nname = \"demo\"\n"),
        ("Cargo.lock", ""),
        ("README.md", "## Build\n\n    cargo build --release\n"),
        ("rust-toolchain.toml", "[toolchain]\nchannel = \"1.85\"\n"),
        (".github/workflows/ci.yml", "steps:\n  - run: cargo build\n"),
    ]);
    let checks = BuildPillar.evaluate(temp_dir.path()).unwrap();

    let manifest = check(&checks, "Build manifest exists");
    assert!(manifest.is_passed());
    assert!(manifest.message().contains("Cargo.toml"));
    assert!(check(&checks, "Dependency lock file present").is_passed());
    assert!(check(&checks, "Build command documented").is_passed());
    assert!(check(&checks, "CI build workflow").is_passed());
    assert!(check(&checks, "Reproducible toolchain pinned").is_passed());
    assert!(check(&checks, "Task runner configured").is_failed());
}

#[test]
fn npm_scripts_count_as_task_runner() {
    let temp_dir = repo(&[("package.json", r#"{"scripts": {"build": "tsc"}}"#)]);
    let checks = BuildPillar.evaluate(temp_dir.path()).unwrap();

    let runner = check(&checks, "Task runner configured");
    assert!(runner.is_passed());
    assert!(runner.message().contains("package.json"));
}

#[test]
fn malformed_package_json_only_fails_task_runner() {
    let temp_dir = repo(&[("package.json", "{ scripts: ")]);
    let checks = BuildPillar.evaluate(temp_dir.path()).unwrap();

    assert!(check(&checks, "Build manifest exists").is_passed());
    assert!(check(&checks, "Task runner configured").is_failed());
}

#[test]
fn ci_without_build_step_fails() {
    let temp_dir = repo(&[(".gitlab-ci.yml", "stages:\n  - deploy\n")]);
    let checks = BuildPillar.evaluate(temp_dir.path()).unwrap();

    let ci = check(&checks, "CI build workflow");
    assert!(ci.is_failed());
    assert!(ci.message().contains("no build step"));
}

#[test]
fn levels_are_assigned() {
    let temp_dir = repo(&[]);
    let checks = BuildPillar.evaluate(temp_dir.path()).unwrap();

    let levels: Vec<u8> = checks.iter().map(CheckResult::level).collect();
    assert_eq!(levels, vec![1, 2, 2, 3, 3, 4]);
}
