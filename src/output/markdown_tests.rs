use super::*;
use crate::model::{CheckResult, PillarResult};

fn sample_result() -> ScanResult {
    let build = PillarResult::from_checks(
        "Build System",
        vec![
            CheckResult::pass("Build manifest exists", "Found Cargo.toml"),
            CheckResult::fail("Build in CI", "No CI build step").with_level(3),
        ],
        1.0,
    );
    ScanResult::from_pillars("/work/demo", vec![build])
}

#[test]
fn test_markdown_header() {
    let output = MarkdownFormatter.format(&sample_result()).unwrap();

    assert!(output.starts_with("# Agent Readiness Score Report\n"));
    assert!(output.contains("**Repository:** /work/demo"));
    assert!(output.contains("**Overall Score:** 50% (Level 2)"));
    assert!(output.contains("**Maturity:** Developing"));
}

#[test]
fn test_markdown_pillar_table() {
    let output = MarkdownFormatter.format(&sample_result()).unwrap();

    assert!(output.contains("| Pillar | Score | Level | Passed |"));
    assert!(output.contains("| Build System | 50% | 2 | 1/2 |"));
}

#[test]
fn test_markdown_checks_grouped_by_level() {
    let output = MarkdownFormatter.format(&sample_result()).unwrap();

    let level1 = output.find("### Level 1: Initial - Ad-hoc processes").unwrap();
    let level3 = output.find("### Level 3: Defined - Documented and standardized").unwrap();
    assert!(level1 < level3);
    assert!(!output.contains("### Level 2"));
    assert!(output.contains("✅ **Build System:** Build manifest exists - Found Cargo.toml"));
    assert!(output.contains("❌ **Build System:** Build in CI - No CI build step"));
}

#[test]
fn test_markdown_empty_scan_has_no_levels() {
    let result = ScanResult::from_pillars("/empty", Vec::new());
    let output = MarkdownFormatter.format(&result).unwrap();

    assert!(output.contains("## Check Results"));
    assert!(!output.contains("### Level"));
}
