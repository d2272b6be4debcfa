use std::path::Path;

use super::CheckDef;
use super::probe::{README_NAMES, RepoProbe, contains_any};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const README_EXISTS: CheckDef = CheckDef::new("README exists", 1, Severity::Required);
const README_QUALITY: CheckDef = CheckDef::new("README quality", 2, Severity::Recommended);
const AGENTS_EXISTS: CheckDef = CheckDef::new("AGENTS.md exists", 2, Severity::Recommended);
const CONTRIBUTING: CheckDef = CheckDef::new("CONTRIBUTING exists", 2, Severity::Recommended);
const AGENTS_QUALITY: CheckDef = CheckDef::new("AGENTS.md quality", 3, Severity::Recommended);
const API_DOCS: CheckDef = CheckDef::new("API documentation", 3, Severity::Recommended);
const ARCHITECTURE: CheckDef =
    CheckDef::new("Architecture documented", 3, Severity::Recommended);
const COVERAGE: CheckDef = CheckDef::new("Documentation coverage", 4, Severity::Optional);
const CHANGELOG: CheckDef = CheckDef::new("Changelog exists", 4, Severity::Optional);
const INLINE_DOCS: CheckDef = CheckDef::new("Inline documentation", 4, Severity::Optional);
const CODE_OF_CONDUCT: CheckDef = CheckDef::new("Code of conduct", 5, Severity::Optional);
const GENERATED_DOCS: CheckDef = CheckDef::new("Auto-generated docs", 5, Severity::Optional);
const EXAMPLES: CheckDef = CheckDef::new("Examples and tutorials", 5, Severity::Optional);

const README_MIN_LENGTH: usize = 500;
const AGENTS_MIN_LENGTH: usize = 200;
const COVERAGE_THRESHOLD: f64 = 60.0;
const INLINE_THRESHOLD: f64 = 20.0;
const SAMPLE_FILES: usize = 10;

const DOC_SOURCE_EXTENSIONS: &[&str] = &["py", "rs", "go", "js", "ts"];

/// README, agent guide and supporting project documentation.
pub struct DocumentationPillar;

/// Raw contents of the documents several checks share.
struct Docs {
    readme_name: Option<String>,
    readme: Option<String>,
    agents: Option<String>,
}

impl Docs {
    fn discover(probe: &RepoProbe) -> Self {
        let readme_name = probe.find_root_file_ci(README_NAMES);
        let readme = readme_name.as_deref().and_then(|n| probe.read(n));
        Self {
            readme_name,
            readme,
            agents: probe.read("AGENTS.md"),
        }
    }
}

impl Pillar for DocumentationPillar {
    fn name(&self) -> &str {
        "Documentation"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let docs = Docs::discover(&probe);

        Ok(vec![
            check_readme_exists(&docs),
            check_readme_quality(&docs),
            check_agents_exists(&probe),
            check_contributing(&probe, &docs),
            check_agents_quality(&docs),
            check_api_docs(&probe),
            check_architecture(&probe, &docs),
            check_coverage(&probe),
            check_changelog(&probe),
            check_inline_docs(&probe),
            check_code_of_conduct(&probe),
            check_generated_docs(&probe),
            check_examples(&probe, &docs),
        ])
    }
}

fn check_readme_exists(docs: &Docs) -> CheckResult {
    match &docs.readme_name {
        Some(name) => README_EXISTS.pass(format!("README found: {name}")),
        None => README_EXISTS.fail("No README found in repository root"),
    }
}

fn readme_indicators(content: &str) -> Vec<&'static str> {
    let lower = content.to_lowercase();
    let mut indicators = Vec::new();
    if content.chars().count() >= README_MIN_LENGTH {
        indicators.push("adequate length");
    }
    if contains_any(&lower, &["installation", "setup", "getting started"]) {
        indicators.push("installation/setup section");
    }
    if contains_any(&lower, &["## usage", "# usage", "quick start", "examples"]) {
        indicators.push("usage/examples section");
    }
    if contains_any(&lower, &["## project", "# overview", "# about", "description"]) {
        indicators.push("project description");
    }
    if content.contains('`') {
        indicators.push("code examples");
    }
    if content.contains('[') && content.contains("](") {
        indicators.push("links/references");
    }
    indicators
}

fn check_readme_quality(docs: &Docs) -> CheckResult {
    let Some(content) = &docs.readme else {
        return README_QUALITY.fail("Cannot evaluate quality - no README found");
    };
    let indicators = readme_indicators(content);
    match indicators.as_slice() {
        [] => README_QUALITY.fail("README lacks key sections (installation, usage, description)"),
        [only] => README_QUALITY.fail(format!("README minimal quality ({only} only)")),
        [first, second, ..] => {
            README_QUALITY.pass(format!("README has good quality ({first}, {second})"))
        }
    }
}

fn check_agents_exists(probe: &RepoProbe) -> CheckResult {
    if probe.is_file("AGENTS.md") {
        AGENTS_EXISTS.pass("AGENTS.md found")
    } else {
        AGENTS_EXISTS.fail("AGENTS.md not found (AI agent readiness guide recommended)")
    }
}

fn check_contributing(probe: &RepoProbe, docs: &Docs) -> CheckResult {
    if let Some(file) = probe.first_existing(&["CONTRIBUTING.md", ".github/CONTRIBUTING.md"]) {
        return CONTRIBUTING.pass(format!("Contribution guidelines found: {file}"));
    }
    let in_readme = docs
        .readme
        .as_deref()
        .is_some_and(|r| contains_any(&r.to_lowercase(), &["# contributing", "contribution"]));
    if in_readme {
        return CONTRIBUTING.pass("Contributing guidelines in README");
    }
    CONTRIBUTING.fail("No contribution guidelines found (CONTRIBUTING.md or README section)")
}

fn agents_sections(lower: &str) -> Vec<&'static str> {
    let groups: [(&str, &[&str]); 4] = [
        ("architecture", &["architecture", "design", "structure", "codebase"]),
        ("setup", &["setup", "development", "install", "environment"]),
        ("testing", &["test", "pytest", "jest", "cargo test"]),
        ("file locations", &["file", "location", "structure", "directory"]),
    ];
    groups
        .iter()
        .filter(|(_, words)| contains_any(lower, words))
        .map(|(section, _)| *section)
        .collect()
}

fn check_agents_quality(docs: &Docs) -> CheckResult {
    let Some(content) = &docs.agents else {
        return AGENTS_QUALITY.fail("Cannot evaluate quality - AGENTS.md not found");
    };
    if content.chars().count() < AGENTS_MIN_LENGTH {
        return AGENTS_QUALITY.fail(format!(
            "AGENTS.md is too short (minimum {AGENTS_MIN_LENGTH} characters)"
        ));
    }
    let sections = agents_sections(&content.to_lowercase());
    match sections.len() {
        0 => AGENTS_QUALITY.fail("AGENTS.md lacks key sections (architecture, setup, testing)"),
        n if n < 3 => {
            AGENTS_QUALITY.fail(format!("AGENTS.md incomplete ({n} sections, need >=3)"))
        }
        _ => AGENTS_QUALITY.pass(format!("AGENTS.md comprehensive ({})", sections.join(", "))),
    }
}

fn has_doc_comments(text: &str) -> bool {
    contains_any(text, &["\"\"\"", "'''", "///", "//!", "/**"])
}

fn check_api_docs(probe: &RepoProbe) -> CheckResult {
    if let Some(file) = probe.first_existing(&["API.md", "ENDPOINTS.md"]) {
        return API_DOCS.pass(format!("API documentation found: {file}"));
    }
    let documented = probe
        .source_texts(DOC_SOURCE_EXTENSIONS, SAMPLE_FILES)
        .iter()
        .filter(|(_, text)| has_doc_comments(text))
        .count();
    if documented >= 5 {
        API_DOCS.pass(format!("Doc comments found in {documented} sampled modules"))
    } else {
        API_DOCS.fail("No API documentation found (API.md or module doc comments)")
    }
}

fn check_architecture(probe: &RepoProbe, docs: &Docs) -> CheckResult {
    if let Some(file) = probe.first_existing(&["ARCHITECTURE.md", "DESIGN.md"]) {
        return ARCHITECTURE.pass(format!("Architecture documentation found: {file}"));
    }
    if probe.has_files(&["docs/*architecture*", "docs/*ARCHITECTURE*"]) {
        return ARCHITECTURE.pass("Architecture documentation found in docs/");
    }
    let in_agents = docs.agents.as_deref().is_some_and(|a| {
        contains_any(&a.to_lowercase(), &["architecture", "design", "structure", "overview"])
    });
    if in_agents {
        return ARCHITECTURE.pass("Architecture described in AGENTS.md");
    }
    ARCHITECTURE.fail("No architecture documentation found")
}

fn check_coverage(probe: &RepoProbe) -> CheckResult {
    let dirs = probe.root_subdirs();
    if dirs.is_empty() {
        return COVERAGE.fail("No subdirectories found to evaluate coverage");
    }
    let documented = dirs
        .iter()
        .filter(|d| probe.is_file(&format!("{d}/README.md")))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let percent = documented as f64 / dirs.len() as f64 * 100.0;
    if percent >= COVERAGE_THRESHOLD {
        COVERAGE.pass(format!("Documentation covers {percent:.0}% of components"))
    } else {
        COVERAGE.fail(format!("Documentation covers only {percent:.0}% of components"))
    }
}

fn check_changelog(probe: &RepoProbe) -> CheckResult {
    match probe.first_existing(&["CHANGELOG.md", "HISTORY.md", "NEWS.md", "CHANGES.md"]) {
        Some(file) => CHANGELOG.pass(format!("Changelog found: {file}")),
        None => CHANGELOG.fail("No CHANGELOG.md found"),
    }
}

fn is_comment_line(line: &str) -> bool {
    ["#", "//", "/*", "*", "\"\"\"", "'''"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
        || line.contains("\"\"\"")
}

fn check_inline_docs(probe: &RepoProbe) -> CheckResult {
    let samples = probe.source_texts(DOC_SOURCE_EXTENSIONS, SAMPLE_FILES);
    if samples.is_empty() {
        return INLINE_DOCS.fail("No source files found to evaluate");
    }
    let (total, documented) = samples
        .iter()
        .flat_map(|(_, text)| text.lines().map(str::trim).filter(|l| !l.is_empty()))
        .fold((0_usize, 0_usize), |(total, documented), line| {
            (total + 1, documented + usize::from(is_comment_line(line)))
        });
    if total == 0 {
        return INLINE_DOCS.fail("Could not analyze code documentation");
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = documented as f64 / total as f64 * 100.0;
    if percent >= INLINE_THRESHOLD {
        INLINE_DOCS.pass(format!("Code has inline documentation ({percent:.0}% coverage)"))
    } else {
        INLINE_DOCS.fail(format!(
            "Code has limited inline documentation ({percent:.0}% coverage)"
        ))
    }
}

fn check_code_of_conduct(probe: &RepoProbe) -> CheckResult {
    match probe.first_existing(&["CODE_OF_CONDUCT.md", ".github/CODE_OF_CONDUCT.md"]) {
        Some(file) => CODE_OF_CONDUCT.pass(format!("Code of conduct found: {file}")),
        None => CODE_OF_CONDUCT.fail("No code of conduct found (CODE_OF_CONDUCT.md)"),
    }
}

fn check_generated_docs(probe: &RepoProbe) -> CheckResult {
    let tools: [(&str, &[&str]); 5] = [
        ("Sphinx", &["conf.py", "docs/conf.py"]),
        ("MkDocs", &["mkdocs.yml"]),
        ("TypeDoc", &["typedoc.json"]),
        ("JSDoc", &["jsdoc.json"]),
        ("mdBook", &["book.toml"]),
    ];
    let found: Vec<&str> = tools
        .iter()
        .filter(|(_, files)| probe.first_existing(files).is_some())
        .map(|(tool, _)| *tool)
        .collect();
    if found.is_empty() {
        GENERATED_DOCS.fail("No doc generation tool configured (Sphinx, MkDocs, TypeDoc, JSDoc)")
    } else {
        GENERATED_DOCS.pass(format!(
            "Documentation generation configured ({})",
            found.join(", ")
        ))
    }
}

fn check_examples(probe: &RepoProbe, docs: &Docs) -> CheckResult {
    let mut found = Vec::new();
    for dir in ["examples", "tutorials"] {
        if probe.is_dir(dir) {
            let count = probe.find_files(&[&format!("{dir}/**")]).len();
            found.push(format!("{dir}/ ({count} files)"));
        }
    }
    let notebooks = probe.find_files(&["**/*.ipynb"]).len();
    if notebooks > 0 {
        found.push(format!("Jupyter notebooks ({notebooks})"));
    }
    if docs.readme.as_deref().is_some_and(|r| r.contains("```")) {
        found.push("code examples in README".to_string());
    }
    if found.is_empty() {
        EXAMPLES.fail("No examples or tutorials found")
    } else {
        let shown: Vec<&str> = found.iter().take(2).map(String::as_str).collect();
        EXAMPLES.pass(format!("Examples/tutorials found ({})", shown.join(", ")))
    }
}

#[cfg(test)]
#[path = "documentation_tests.rs"]
mod tests;
