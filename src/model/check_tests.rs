use serde_json::json;

use super::*;

#[test]
fn new_check_has_defaults() {
    let check = CheckResult::new("README exists", true, "README found: README.md");
    assert_eq!(check.name(), "README exists");
    assert!(check.is_passed());
    assert!(!check.is_failed());
    assert_eq!(check.message(), "README found: README.md");
    assert_eq!(check.severity(), Severity::Optional);
    assert_eq!(check.level(), 1);
    assert!(check.metadata().is_empty());
}

#[test]
fn pass_and_fail_constructors() {
    assert!(CheckResult::pass("a", "ok").is_passed());
    assert!(CheckResult::fail("b", "missing").is_failed());
}

#[test]
fn builder_sets_severity_and_level() {
    let check = CheckResult::fail("Secrets not in code", "Potential secrets detected in code")
        .with_severity(Severity::Required)
        .with_level(3);
    assert_eq!(check.severity(), Severity::Required);
    assert_eq!(check.level(), 3);
}

#[test]
fn level_is_stored_as_given() {
    assert_eq!(CheckResult::pass("a", "b").level(), MIN_LEVEL);
    assert_eq!(CheckResult::pass("a", "b").with_level(MAX_LEVEL).level(), MAX_LEVEL);
    assert_eq!(CheckResult::pass("a", "b").with_level(9).level(), 9);
}

#[test]
fn metadata_keeps_insertion_order() {
    let check = CheckResult::pass("Lock file", "found")
        .with_metadata("files", json!(["Cargo.lock"]))
        .with_metadata("count", 1);
    let keys: Vec<_> = check.metadata().keys().cloned().collect();
    assert_eq!(keys, vec!["files", "count"]);
    assert_eq!(check.metadata()["count"], json!(1));
}

#[test]
fn serializes_severity_as_string() {
    let check = CheckResult::fail("x", "y").with_severity(Severity::Recommended);
    let value = serde_json::to_value(&check).unwrap();
    assert_eq!(value["severity"], json!("recommended"));
    assert_eq!(value["passed"], json!(false));
    assert_eq!(value["metadata"], json!({}));
}
