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

const RICH_AGENTS: &str = "# Agent guide\n\n\
    ## Architecture\nThe codebase is split into a parser and an evaluator.\n\n\
    ## Setup\nInstall the development environment with `make setup`.\n\n\
    ## Testing\nRun `cargo test` before pushing.\n\n\
    ## File locations\nSources live in the src directory.\n";

#[test]
fn empty_repo() {
    let temp_dir = repo(&[]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    assert_eq!(checks.len(), 13);
    let readme = check(&checks, "README exists");
    assert!(readme.is_failed());
    assert_eq!(readme.message(), "No README found in repository root");
    assert_eq!(
        check(&checks, "Documentation coverage").message(),
        "No subdirectories found to evaluate coverage"
    );
}

#[test]
fn lowercase_readme_is_found() {
    let temp_dir = repo(&[("readme.md", "# Demo")]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    let readme = check(&checks, "README exists");
    assert!(readme.is_passed());
    assert!(readme.message().contains("readme.md"));
}

#[test]
fn readme_quality_needs_two_indicators() {
    let minimal = repo(&[("README.md", "Just a title")]);
    let checks = DocumentationPillar.evaluate(minimal.path()).unwrap();
    assert!(check(&checks, "README quality").is_failed());

    let good = repo(&[(
        "README.md",
        "# Demo\n\n## Installation\n\n```sh\npip install demo\n```\n",
    )]);
    let checks = DocumentationPillar.evaluate(good.path()).unwrap();
    let quality = check(&checks, "README quality");
    assert!(quality.is_passed());
    assert!(quality.message().contains("installation/setup section"));
}

#[test]
fn agents_guide_quality() {
    let temp_dir = repo(&[("AGENTS.md", RICH_AGENTS)]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    assert!(check(&checks, "AGENTS.md exists").is_passed());
    let quality = check(&checks, "AGENTS.md quality");
    assert!(quality.is_passed(), "{}", quality.message());
    assert!(check(&checks, "Architecture documented").is_passed());
}

#[test]
fn short_agents_guide_fails_quality() {
    let temp_dir = repo(&[("AGENTS.md", "# Agents\nRun tests.")]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    let quality = check(&checks, "AGENTS.md quality");
    assert!(quality.is_failed());
    assert!(quality.message().contains("too short"));
}

#[test]
fn contributing_section_in_readme() {
    let temp_dir = repo(&[("README.md", "## Contributing\nPRs welcome.")]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    assert!(check(&checks, "CONTRIBUTING exists").is_passed());
}

#[test]
fn documentation_coverage_threshold() {
    let temp_dir = repo(&[
        ("api/README.md", ""),
        ("core/README.md", ""),
        ("web/index.js", ""),
    ]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    let coverage = check(&checks, "Documentation coverage");
    assert!(coverage.is_passed());
    assert!(coverage.message().contains("67%"));
}

#[test]
fn api_docs_from_doc_comments() {
    let files: Vec<(String, &str)> = (0..5)
        .map(|i| (format!("src/mod{i}.rs"), "//! Module docs.\n/// A function.\nfn f() {}\n"))
        .collect();
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), *c)).collect();
    let temp_dir = repo(&borrowed);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    assert!(check(&checks, "API documentation").is_passed());
    assert!(check(&checks, "Inline documentation").is_passed());
}

#[test]
fn level_five_documents() {
    let temp_dir = repo(&[
        (".github/CODE_OF_CONDUCT.md", ""),
        ("mkdocs.yml", "site_name: demo"),
        ("examples/basic.py", ""),
        ("CHANGELOG.md", ""),
    ]);
    let checks = DocumentationPillar.evaluate(temp_dir.path()).unwrap();

    assert!(check(&checks, "Code of conduct").is_passed());
    assert!(check(&checks, "Auto-generated docs").message().contains("MkDocs"));
    assert!(check(&checks, "Examples and tutorials").is_passed());
    assert!(check(&checks, "Changelog exists").is_passed());
}
