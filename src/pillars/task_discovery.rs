use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::CheckDef;
use super::probe::{RepoProbe, contains_any};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const ISSUE_TRACKER: CheckDef = CheckDef::new("Issue tracker present", 1, Severity::Required);
const CONTRIBUTING_GUIDE: CheckDef =
    CheckDef::new("Contributing guide exists", 1, Severity::Required);
const README_CONTRIBUTION: CheckDef =
    CheckDef::new("README contribution section", 2, Severity::Recommended);
const ISSUES_LABELED: CheckDef = CheckDef::new("Issues labeled", 2, Severity::Recommended);
const ROADMAP: CheckDef = CheckDef::new("Roadmap visible", 2, Severity::Recommended);
const GOOD_FIRST_ISSUES: CheckDef =
    CheckDef::new("Good-first-issues marked", 2, Severity::Recommended);
const ISSUE_TEMPLATES: CheckDef = CheckDef::new("Issue templates exist", 3, Severity::Recommended);
const PR_TEMPLATE: CheckDef = CheckDef::new("PR template exists", 3, Severity::Recommended);
const PROJECT_BOARD: CheckDef =
    CheckDef::new("Project board configured", 3, Severity::Recommended);
const MILESTONES: CheckDef = CheckDef::new("Milestones defined", 3, Severity::Recommended);
const AUTO_LABELING: CheckDef = CheckDef::new("Automated issue labeling", 4, Severity::Optional);
const TRIAGE: CheckDef = CheckDef::new("Issue triaging workflow", 4, Severity::Optional);
const RELEASES: CheckDef = CheckDef::new("Release management", 4, Severity::Optional);
const CONTRIBUTOR_ANALYTICS: CheckDef =
    CheckDef::new("Contributor analytics", 4, Severity::Optional);
const TASK_CREATION: CheckDef = CheckDef::new("Automated task creation", 5, Severity::Optional);
const ROUTING: CheckDef = CheckDef::new("Intelligent task routing", 5, Severity::Optional);
const FEEDBACK: CheckDef = CheckDef::new("Continuous feedback loops", 5, Severity::Optional);
const RECOMMENDATIONS: CheckDef = CheckDef::new("Task recommendations", 5, Severity::Optional);

const CONTRIBUTING_FILES: &[&str] = &[
    "CONTRIBUTING.md",
    "CONTRIBUTING.rst",
    ".github/CONTRIBUTING.md",
    "docs/CONTRIBUTING.md",
];

const ISSUE_TEMPLATE_PATHS: &[&str] = &[
    ".github/ISSUE_TEMPLATE",
    ".github/ISSUE_TEMPLATE.md",
    "issue_template.md",
    ".gitlab/issue_templates",
];

const PR_TEMPLATE_PATHS: &[&str] = &[
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    ".github/PULL_REQUEST_TEMPLATE",
    "pull_request_template.md",
    ".gitlab/merge_request_templates",
];

const LABEL_FILES: &[&str] = &[".github/labels.json", ".github/labels.yml", ".github/labels.yaml"];
const ROADMAP_FILES: &[&str] = &[
    "ROADMAP.md",
    "ROADMAP.rst",
    "docs/ROADMAP.md",
    "docs/VISION.md",
    "VISION.md",
];
const CHANGELOG_FILES: &[&str] = &["CHANGELOG.md", "CHANGELOG.rst", "CHANGES.md", "HISTORY.md"];
const CODEOWNERS_FILES: &[&str] = &[".github/CODEOWNERS", "CODEOWNERS", "docs/CODEOWNERS"];
const RELEASE_TOOL_FILES: &[&str] = &[
    ".goreleaser.yml",
    ".goreleaser.yaml",
    "release-please-config.json",
    ".releaserc",
    "release.toml",
];
const CONTRIBUTOR_FILES: &[&str] = &["ALL_CONTRIBUTORS.md", ".all-contributorsrc"];

const ISSUE_TEMPLATE_GLOBS: &[&str] = &[".github/ISSUE_TEMPLATE/*.{md,yml,yaml}"];
const WORKFLOW_GLOBS: &[&str] = &[".github/workflows/*.{yml,yaml}"];
const TODO_SOURCE_GLOBS: &[&str] = &["src/**/*.{py,js,ts,go,rs}"];

const CONTRIBUTION_PHRASES: &[&str] =
    &["contribut", "getting involved", "how to help", "development"];
const BEGINNER_PHRASES: &[&str] = &[
    "good-first-issue",
    "good first issue",
    "beginner-friendly",
    "beginner friendly",
    "help wanted",
    "starter tasks",
    "easy tasks",
];
const BOARD_PHRASES: &[&str] = &["project board", "github projects", "trello", "jira board"];
const CONTRIBUTOR_PHRASES: &[&str] = &["contributor", "acknowledgments", "thanks to", "built by"];
const TASK_CREATION_PHRASES: &[&str] =
    &["todo", "automated task", "error tracking", "sentry", "bugsnag"];
const TRIAGE_KEYWORDS: &[&str] = &["triage", "stale", "close", "archive"];
const FEEDBACK_KEYWORDS: &[&str] = &["comment", "feedback", "metrics", "analytics", "status"];

static LINEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blinear\b").expect("Invalid regex"));

static RECOMMENDATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"recommend|suggestion|smart match|personali[sz]ed|machine learning|\bai\b")
        .expect("Invalid regex")
});

static ML_WORKFLOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bml\b|\bmodels?\b").expect("Invalid regex"));

/// Whether a newcomer, human or agent, can find something useful to work on.
pub struct TaskDiscoveryPillar;

/// A GitHub Actions workflow file, lowercased.
struct Workflow {
    name: String,
    text: String,
}

/// Project-management signals gathered once per evaluation.
struct Tasks {
    readme: String,
    contributing: Option<String>,
    issue_templates: Vec<String>,
    workflows: Vec<Workflow>,
    changelog: Option<&'static str>,
}

impl Tasks {
    fn gather(probe: &RepoProbe) -> Self {
        let read_all = |globs: &[&str]| -> Vec<(String, String)> {
            probe
                .find_files(globs)
                .iter()
                .filter_map(|path| {
                    let name = path.file_name()?.to_string_lossy().into_owned();
                    Some((name, probe.read_path(path)?.to_lowercase()))
                })
                .collect()
        };
        Self {
            readme: probe.readme_lower().unwrap_or_default(),
            contributing: probe
                .first_existing(CONTRIBUTING_FILES)
                .map(|f| probe.read_lower(f).unwrap_or_default()),
            issue_templates: read_all(ISSUE_TEMPLATE_GLOBS)
                .into_iter()
                .map(|(_, text)| text)
                .collect(),
            workflows: read_all(WORKFLOW_GLOBS)
                .into_iter()
                .map(|(name, text)| Workflow { name, text })
                .collect(),
            changelog: probe.first_existing(CHANGELOG_FILES),
        }
    }

    fn workflow_matches(&self, predicate: impl Fn(&str) -> bool) -> Option<&str> {
        self.workflows
            .iter()
            .find(|w| predicate(&w.text))
            .map(|w| w.name.as_str())
    }
}

impl Pillar for TaskDiscoveryPillar {
    fn name(&self) -> &str {
        "Task Discovery"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let tasks = Tasks::gather(&probe);

        Ok(vec![
            check_issue_tracker(&probe),
            check_contributing_guide(&probe),
            check_readme_contribution(&tasks),
            check_issues_labeled(&probe, &tasks),
            check_roadmap(&probe, &tasks),
            check_good_first_issues(&tasks),
            check_issue_templates(&probe),
            check_pr_template(&probe),
            check_project_board(&probe, &tasks),
            check_milestones(&probe, &tasks),
            check_auto_labeling(&tasks),
            check_triage(&tasks),
            check_releases(&probe, &tasks),
            check_contributor_analytics(&probe, &tasks),
            check_task_creation(&probe, &tasks),
            check_routing(&probe, &tasks),
            check_feedback(&tasks),
            check_recommendations(&tasks),
        ])
    }
}

fn check_issue_tracker(probe: &RepoProbe) -> CheckResult {
    let github = probe.is_dir(".github");
    let result = if github {
        ISSUE_TRACKER.pass("GitHub Issues configured")
    } else if probe.is_dir(".gitlab") {
        ISSUE_TRACKER.pass("GitLab issues configured")
    } else {
        ISSUE_TRACKER.fail("No issue tracker configured (GitHub Issues not found)")
    };
    result.with_metadata("github_issues", github)
}

fn check_contributing_guide(probe: &RepoProbe) -> CheckResult {
    match probe.first_existing(CONTRIBUTING_FILES) {
        Some(file) => CONTRIBUTING_GUIDE.pass(format!("Contributing guide found ({file})")),
        None => CONTRIBUTING_GUIDE.fail("No contribution guide found"),
    }
}

fn check_readme_contribution(tasks: &Tasks) -> CheckResult {
    if contains_any(&tasks.readme, CONTRIBUTION_PHRASES) {
        README_CONTRIBUTION.pass("README includes contribution section")
    } else {
        README_CONTRIBUTION.fail("No contribution section in README")
    }
}

fn check_issues_labeled(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    let has_labels = probe.first_existing(LABEL_FILES).is_some();
    let in_templates = tasks.issue_templates.iter().any(|t| t.contains("label"));
    let result = if has_labels || in_templates {
        ISSUES_LABELED.pass("Issue labels found or label system evident")
    } else {
        ISSUES_LABELED.fail("No issue labels defined")
    };
    result.with_metadata("has_labels", has_labels)
}

fn check_roadmap(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    let roadmap_file = probe.first_existing(ROADMAP_FILES);
    let result = if let Some(file) = roadmap_file {
        ROADMAP.pass(format!("Roadmap or vision document found: {file}"))
    } else if contains_any(&tasks.readme, &["roadmap", "vision", "plan"]) {
        ROADMAP.pass("Roadmap or vision mentioned in README")
    } else {
        ROADMAP.fail("No roadmap or vision document found")
    };
    result.with_metadata("roadmap_file", roadmap_file.is_some())
}

fn check_good_first_issues(tasks: &Tasks) -> CheckResult {
    let guided = tasks
        .contributing
        .as_deref()
        .is_some_and(|c| contains_any(c, BEGINNER_PHRASES))
        || contains_any(&tasks.readme, BEGINNER_PHRASES)
        || tasks
            .issue_templates
            .iter()
            .any(|t| t.contains("good-first-issue"));
    if guided {
        GOOD_FIRST_ISSUES.pass("Good-first-issue labels or beginner guidance found")
    } else {
        GOOD_FIRST_ISSUES.fail("No good-first-issue labels or guidance")
    }
}

fn check_issue_templates(probe: &RepoProbe) -> CheckResult {
    let template = probe.first_existing(ISSUE_TEMPLATE_PATHS);
    let result = match template {
        Some(path) => ISSUE_TEMPLATES.pass(format!("Issue templates found: {path}")),
        None => ISSUE_TEMPLATES.fail("No issue templates found"),
    };
    result.with_metadata("has_templates", template.is_some())
}

fn check_pr_template(probe: &RepoProbe) -> CheckResult {
    let template = probe.first_existing(PR_TEMPLATE_PATHS);
    let result = match template {
        Some(path) => PR_TEMPLATE.pass(format!("Pull request template found: {path}")),
        None => PR_TEMPLATE.fail("No pull request template found"),
    };
    result.with_metadata("has_template", template.is_some())
}

fn check_project_board(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    let configured = probe
        .first_existing(&[".github/project.yml", ".github/projects.yml"])
        .is_some();
    if configured
        || contains_any(&tasks.readme, BOARD_PHRASES)
        || LINEAR_RE.is_match(&tasks.readme)
    {
        PROJECT_BOARD.pass("Project board configured or referenced")
    } else {
        PROJECT_BOARD.fail("No project board configured")
    }
}

fn has_declared_version(probe: &RepoProbe) -> bool {
    let npm = probe
        .read_json("package.json")
        .is_some_and(|pkg| pkg.get("version").is_some());
    let python = probe
        .pyproject_lower()
        .is_some_and(|text| text.contains("version"));
    let cargo = probe.read_toml("Cargo.toml").is_some_and(|t| {
        t.get("package")
            .and_then(|p| p.get("version"))
            .is_some()
    });
    npm || python || cargo
}

fn check_milestones(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    let changelog_found = tasks.changelog.is_some();
    let has_milestones = changelog_found || has_declared_version(probe);
    let result = if has_milestones {
        MILESTONES.pass("Milestones or release planning documented")
    } else if probe.exists(".git") {
        MILESTONES.pass("Version history tracked in git")
    } else {
        MILESTONES.fail("No milestones or release plan defined")
    };
    result
        .with_metadata("changelog_found", changelog_found)
        .with_metadata("has_milestones", has_milestones)
}

fn check_auto_labeling(tasks: &Tasks) -> CheckResult {
    let workflow = tasks.workflow_matches(|text| {
        text.contains("label") && (text.contains("add") || text.contains("pull_request"))
    });
    match workflow {
        Some(name) => AUTO_LABELING.pass(format!("Automated issue labeling configured ({name})")),
        None => AUTO_LABELING.fail("No automated issue labeling configured"),
    }
}

fn check_triage(tasks: &Tasks) -> CheckResult {
    match tasks.workflow_matches(|text| contains_any(text, TRIAGE_KEYWORDS)) {
        Some(name) => TRIAGE.pass(format!("Issue triaging workflow configured ({name})")),
        None => TRIAGE.fail("No issue triaging workflow"),
    }
}

fn check_releases(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    if let Some(file) = tasks.changelog {
        return RELEASES.pass(format!("Release management documented ({file})"));
    }
    if let Some(file) = probe.first_existing(RELEASE_TOOL_FILES) {
        return RELEASES.pass(format!("Release tooling configured ({file})"));
    }
    let workflow = tasks
        .workflows
        .iter()
        .find(|w| w.name.contains("release") && w.text.contains("release"));
    match workflow {
        Some(w) => RELEASES.pass(format!("Release workflow configured ({})", w.name)),
        None => RELEASES.fail("No release management configured"),
    }
}

fn check_contributor_analytics(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    if probe.first_existing(CONTRIBUTOR_FILES).is_some()
        || contains_any(&tasks.readme, CONTRIBUTOR_PHRASES)
    {
        CONTRIBUTOR_ANALYTICS.pass("Contributor analytics or recognition system found")
    } else {
        CONTRIBUTOR_ANALYTICS.fail("No contributor analytics or tracking")
    }
}

fn check_task_creation(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    if contains_any(&tasks.readme, TASK_CREATION_PHRASES) {
        return TASK_CREATION.pass("Automated task creation from TODOs/errors");
    }
    let todos = probe
        .find_files(TODO_SOURCE_GLOBS)
        .iter()
        .any(|path| probe.read_path(path).is_some_and(|text| text.contains("TODO")));
    if todos {
        TASK_CREATION.pass("TODO markers in source can seed new tasks")
    } else {
        TASK_CREATION.fail("No automated task creation")
    }
}

fn check_routing(probe: &RepoProbe, tasks: &Tasks) -> CheckResult {
    let codeowners = probe.first_existing(CODEOWNERS_FILES);
    let result = if let Some(file) = codeowners {
        ROUTING.pass(format!("Intelligent task routing configured ({file})"))
    } else if let Some(name) = tasks.workflow_matches(|text| text.contains("assign")) {
        ROUTING.pass(format!("Automatic assignment configured ({name})"))
    } else {
        ROUTING.fail("No intelligent task routing configured")
    };
    result.with_metadata("has_codeowners", codeowners.is_some())
}

fn check_feedback(tasks: &Tasks) -> CheckResult {
    match tasks.workflow_matches(|text| contains_any(text, FEEDBACK_KEYWORDS)) {
        Some(name) => FEEDBACK.pass(format!("Continuous feedback mechanisms configured ({name})")),
        None => FEEDBACK.fail("No continuous feedback loops"),
    }
}

fn check_recommendations(tasks: &Tasks) -> CheckResult {
    if RECOMMENDATION_RE.is_match(&tasks.readme)
        || tasks.workflow_matches(|text| ML_WORKFLOW_RE.is_match(text)).is_some()
    {
        RECOMMENDATIONS.pass("Task recommendation system indicated")
    } else {
        RECOMMENDATIONS.fail("No task recommendation system")
    }
}

#[cfg(test)]
#[path = "task_discovery_tests.rs"]
mod tests;
