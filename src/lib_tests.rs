use std::path::Path;

use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_BELOW_THRESHOLD);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_BELOW_THRESHOLD, EXIT_CONFIG_ERROR);
}

struct Fixed;

impl Pillar for Fixed {
    fn name(&self) -> &str {
        "Fixed"
    }

    fn evaluate(&self, _target: &Path) -> Result<Vec<CheckResult>> {
        Ok(vec![
            CheckResult::pass("up", "ok").with_severity(Severity::Required),
            CheckResult::fail("down", "missing"),
        ])
    }
}

#[test]
fn public_api_scans_a_custom_pillar() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut scanner = Scanner::new();
    scanner.register_pillar(Box::new(Weighted::new(Fixed, 2.0)));

    let result: ScanResult = scanner.scan(temp_dir.path()).unwrap();

    let pillar: &PillarResult = &result.pillars()[0];
    assert_eq!(pillar.name(), "Fixed");
    assert!((pillar.weight() - 2.0).abs() < f64::EPSILON);
    assert!((result.overall_score() - 50.0).abs() < f64::EPSILON);
    assert_eq!(result.maturity_level(), 2);
}
