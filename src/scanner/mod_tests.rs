use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use super::*;
use crate::model::CheckResult;
use crate::pillar::Weighted;

struct CountingPillar {
    name: &'static str,
    outcomes: Vec<bool>,
    calls: Arc<AtomicUsize>,
}

impl CountingPillar {
    fn boxed(name: &'static str, outcomes: &[bool], calls: &Arc<AtomicUsize>) -> Box<dyn Pillar> {
        Box::new(Self {
            name,
            outcomes: outcomes.to_vec(),
            calls: Arc::clone(calls),
        })
    }
}

impl Pillar for CountingPillar {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, _target: &Path) -> Result<Vec<CheckResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .outcomes
            .iter()
            .enumerate()
            .map(|(i, &passed)| CheckResult::new(format!("{} {i}", self.name), passed, "message"))
            .collect())
    }
}

struct BrokenPillar;

impl Pillar for BrokenPillar {
    fn name(&self) -> &str {
        "Broken"
    }

    fn evaluate(&self, _target: &Path) -> Result<Vec<CheckResult>> {
        Err(ReadinessError::Pillar {
            pillar: "Broken".to_string(),
            message: "unexpected state".to_string(),
        })
    }
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn scan_without_pillars_is_configuration_error() {
    let scanner = Scanner::new();
    let err = scanner.scan(Path::new(".")).unwrap_err();
    assert!(matches!(err, ReadinessError::NoPillars));
}

#[test]
fn no_pillars_is_reported_before_target_checks() {
    let scanner = Scanner::new();
    let err = scanner
        .scan(Path::new("/definitely/does/not/exist"))
        .unwrap_err();
    assert!(matches!(err, ReadinessError::NoPillars));
}

#[test]
fn missing_target_is_not_found_and_runs_nothing() {
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Demo", &[true], &calls));

    let err = scanner
        .scan(Path::new("/tmp/this-path-should-not-exist-xyz"))
        .unwrap_err();

    assert!(matches!(err, ReadinessError::TargetNotFound(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn file_target_is_not_a_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("README.md");
    std::fs::write(&file, "# hi").unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Demo", &[true], &calls));

    let err = scanner.scan(&file).unwrap_err();

    assert!(matches!(err, ReadinessError::NotADirectory(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn one_pass_one_fail_scores_fifty() {
    let temp_dir = TempDir::new().unwrap();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Demo", &[true, false], &counter()));

    let result = scanner.scan(temp_dir.path()).unwrap();

    assert!((result.pillars()[0].score() - 50.0).abs() < 1e-9);
    assert!((result.overall_score() - 50.0).abs() < 1e-9);
    assert_eq!(result.maturity_level(), 2);
}

#[test]
fn weighted_pillars_average_by_weight() {
    let temp_dir = TempDir::new().unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Perfect", &[true], &calls));
    scanner.register_pillar(Box::new(Weighted::new(
        CountingPillar::boxed("Failing", &[false], &calls),
        3.0,
    )));

    let result = scanner.scan(temp_dir.path()).unwrap();

    assert!((result.overall_score() - 25.0).abs() < 1e-9);
    assert_eq!(result.maturity_level(), 1);
}

#[test]
fn empty_pillar_counts_as_perfect() {
    let temp_dir = TempDir::new().unwrap();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Opt-out", &[], &counter()));

    let result = scanner.scan(temp_dir.path()).unwrap();

    assert!((result.overall_score() - 100.0).abs() < 1e-9);
    assert_eq!(result.maturity_level(), 5);
}

#[test]
fn results_follow_registration_order_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillars(vec![
        CountingPillar::boxed("Zeta", &[true], &calls),
        CountingPillar::boxed("Alpha", &[false], &calls),
        CountingPillar::boxed("Mid", &[true, true], &calls),
    ]);

    for _ in 0..2 {
        let result = scanner.scan(temp_dir.path()).unwrap();
        let names: Vec<_> = result.pillars().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[test]
fn duplicate_pillars_both_run() {
    let temp_dir = TempDir::new().unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Same", &[true], &calls));
    scanner.register_pillar(CountingPillar::boxed("Same", &[false], &calls));

    let result = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(scanner.pillar_count(), 2);
    assert_eq!(result.pillars().len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_pillar_aborts_scan() {
    let temp_dir = TempDir::new().unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillar(Box::new(BrokenPillar));
    scanner.register_pillar(CountingPillar::boxed("After", &[true], &calls));

    let err = scanner.scan(temp_dir.path()).unwrap_err();

    assert!(matches!(err, ReadinessError::Pillar { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn target_directory_is_absolute_and_resolved() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("repo")).unwrap();
    let mut scanner = Scanner::new();
    scanner.register_pillar(CountingPillar::boxed("Demo", &[true], &counter()));

    let indirect = temp_dir.path().join("repo").join("..").join("repo");
    let result = scanner.scan(&indirect).unwrap();

    let expected = dunce::canonicalize(temp_dir.path().join("repo")).unwrap();
    assert_eq!(result.target_directory(), expected.display().to_string());
    assert!(Path::new(result.target_directory()).is_absolute());
}

#[test]
fn scores_stay_within_bounds() {
    let temp_dir = TempDir::new().unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillars(vec![
        CountingPillar::boxed("A", &[true, false, false], &calls),
        CountingPillar::boxed("B", &[], &calls),
        CountingPillar::boxed("C", &[false], &calls),
    ]);

    let result = scanner.scan(temp_dir.path()).unwrap();

    assert!((0.0..=100.0).contains(&result.overall_score()));
    for pillar in result.pillars() {
        assert!((0.0..=100.0).contains(&pillar.score()));
    }

    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let weights = [0.7, 0.7, 1.1, 2.5, 2.5, 0.1, 1.0 / 3.0, 0.7];
    let mut uneven = Scanner::new();
    uneven.register_pillars(names.into_iter().zip(weights).map(|(name, weight)| {
        Box::new(Weighted::new(CountingPillar::boxed(name, &[true, true], &calls), weight))
            as Box<dyn Pillar>
    }));

    let result = uneven.scan(temp_dir.path()).unwrap();

    assert!(result.overall_score() <= 100.0, "{}", result.overall_score());
    assert_eq!(result.maturity_level(), 5);

    let mut negative = Scanner::new();
    negative.register_pillars(vec![
        Box::new(Weighted::new(CountingPillar::boxed("A", &[false], &calls), 2.0))
            as Box<dyn Pillar>,
        Box::new(Weighted::new(CountingPillar::boxed("B", &[true], &calls), -1.0)),
    ]);

    let result = negative.scan(temp_dir.path()).unwrap();

    assert!(
        (0.0..=100.0).contains(&result.overall_score()),
        "{}",
        result.overall_score()
    );
    assert_eq!(result.maturity_level(), 1);
}

#[test]
fn progress_callback_sees_every_pillar_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let calls = counter();
    let mut scanner = Scanner::new();
    scanner.register_pillars(vec![
        CountingPillar::boxed("First", &[true], &calls),
        CountingPillar::boxed("Second", &[true], &calls),
    ]);

    let mut seen = Vec::new();
    scanner
        .scan_with_progress(temp_dir.path(), |name| seen.push(name.to_string()))
        .unwrap();

    assert_eq!(seen, vec!["First", "Second"]);
    assert_eq!(scanner.pillar_names().collect::<Vec<_>>(), vec!["First", "Second"]);
}
