use std::fs;

use tempfile::TempDir;

use super::*;

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = temp_dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    temp_dir
}

#[test]
fn readme_found_case_insensitively() {
    let temp_dir = fixture(&[("readme.md", "# Hello World")]);
    let probe = RepoProbe::new(temp_dir.path());

    assert_eq!(probe.find_root_file_ci(README_NAMES).as_deref(), Some("readme.md"));
    assert_eq!(probe.readme_lower().as_deref(), Some("# hello world"));
}

#[test]
fn missing_files_read_as_none() {
    let temp_dir = fixture(&[]);
    let probe = RepoProbe::new(temp_dir.path());

    assert!(probe.read("nope.txt").is_none());
    assert!(probe.readme_lower().is_none());
    assert!(probe.docs_text().is_empty());
}

#[test]
fn invalid_utf8_is_read_lossily() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bin.txt"), [b'o', b'k', 0xff, b'!']).unwrap();
    let probe = RepoProbe::new(temp_dir.path());

    let text = probe.read("bin.txt").unwrap();
    assert!(text.starts_with("ok"));
    assert!(text.ends_with('!'));
}

#[test]
fn malformed_json_is_none() {
    let temp_dir = fixture(&[("good.json", r#"{"a": 1}"#), ("bad.json", "{not json")]);
    let probe = RepoProbe::new(temp_dir.path());

    assert_eq!(probe.read_json("good.json").unwrap()["a"], 1);
    assert!(probe.read_json("bad.json").is_none());
}

#[test]
fn malformed_toml_is_none() {
    let temp_dir = fixture(&[("ok.toml", "[tool.ruff]\nline-length = 100\n"), ("bad.toml", "[[[")]);
    let probe = RepoProbe::new(temp_dir.path());

    assert!(probe.read_toml("ok.toml").unwrap().contains_key("tool"));
    assert!(probe.read_toml("bad.toml").is_none());
}

#[test]
fn first_existing_respects_candidate_order() {
    let temp_dir = fixture(&[("yarn.lock", ""), ("Cargo.lock", "")]);
    let probe = RepoProbe::new(temp_dir.path());

    assert_eq!(probe.first_existing(&["Cargo.lock", "yarn.lock"]), Some("Cargo.lock"));
    assert_eq!(
        probe.existing(&["package-lock.json", "yarn.lock", "Cargo.lock"]),
        vec!["yarn.lock", "Cargo.lock"]
    );
}

#[test]
fn root_subdirs_skip_hidden() {
    let temp_dir = fixture(&[("src/a.py", ""), ("docs/index.md", ""), (".github/x.yml", "")]);
    let probe = RepoProbe::new(temp_dir.path());

    assert_eq!(probe.root_subdirs(), vec!["docs", "src"]);
}

#[test]
fn languages_are_detected_outside_ignored_dirs() {
    let temp_dir = fixture(&[
        ("app/main.py", ""),
        ("src/lib.rs", ""),
        ("node_modules/x/index.js", ""),
    ]);
    let probe = RepoProbe::new(temp_dir.path());

    let languages: Vec<_> = probe.languages().into_iter().collect();
    assert_eq!(languages, vec![Language::Python, Language::Rust]);
}

#[test]
fn ci_text_concatenates_workflows() {
    let temp_dir = fixture(&[
        (".github/workflows/ci.yml", "run: cargo TEST"),
        (".gitlab-ci.yml", "script: make build"),
    ]);
    let probe = RepoProbe::new(temp_dir.path());

    let ci = probe.ci_text();
    assert!(ci.contains("cargo test"));
    assert!(ci.contains("make build"));
    assert_eq!(probe.ci_files().len(), 2);
}

#[test]
fn docs_text_joins_readme_and_agents() {
    let temp_dir = fixture(&[("README.md", "Run PYTEST"), ("AGENTS.md", "Use cargo build")]);
    let probe = RepoProbe::new(temp_dir.path());

    let docs = probe.docs_text();
    assert!(docs.contains("run pytest"));
    assert!(docs.contains("cargo build"));
}

#[test]
fn relative_paths_use_forward_slashes() {
    let temp_dir = fixture(&[("a/b/c.txt", "")]);
    let probe = RepoProbe::new(temp_dir.path());

    let files = probe.find_files(&["**/*.txt"]);
    assert_eq!(probe.relative(&files[0]), "a/b/c.txt");
}

#[test]
fn text_helpers() {
    assert!(contains_any("use tracing::info", &["log", "tracing"]));
    assert!(!contains_any("plain", &["x", "y"]));
    assert_eq!(found_in("ruff and mypy", &["mypy", "black", "ruff"]), vec!["mypy", "ruff"]);
}

#[test]
fn language_from_extension() {
    assert_eq!(Language::from_extension("TSX"), Some(Language::JavaScript));
    assert_eq!(Language::from_extension("md"), None);
    assert!(Language::Rust.is_statically_typed());
    assert!(!Language::Python.is_statically_typed());
    assert_eq!(Language::Go.to_string(), "go");
}
