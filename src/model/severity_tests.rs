use super::*;

#[test]
fn severities_are_ordered() {
    assert!(Severity::Optional < Severity::Recommended);
    assert!(Severity::Recommended < Severity::Required);
    assert!(Severity::Required < Severity::Critical);
    assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Critical));
}

#[test]
fn default_is_optional() {
    assert_eq!(Severity::default(), Severity::Optional);
}

#[test]
fn display_matches_serialized_value() {
    for severity in Severity::ALL {
        let json = serde_json::to_string(&severity).unwrap();
        assert_eq!(json, format!("\"{severity}\""));
    }
}

#[test]
fn parse_accepts_current_names() {
    assert_eq!("optional".parse::<Severity>(), Ok(Severity::Optional));
    assert_eq!("Recommended".parse::<Severity>(), Ok(Severity::Recommended));
    assert_eq!("REQUIRED".parse::<Severity>(), Ok(Severity::Required));
    assert_eq!(" critical ".parse::<Severity>(), Ok(Severity::Critical));
}

#[test]
fn parse_accepts_legacy_names() {
    assert_eq!("info".parse::<Severity>(), Ok(Severity::Optional));
    assert_eq!("warning".parse::<Severity>(), Ok(Severity::Recommended));
    assert_eq!("error".parse::<Severity>(), Ok(Severity::Required));
}

#[test]
fn parse_rejects_unknown() {
    let err = "urgent".parse::<Severity>().unwrap_err();
    assert!(err.contains("urgent"));
}

#[test]
fn deserialize_accepts_legacy_alias() {
    let severity: Severity = serde_json::from_str("\"warning\"").unwrap();
    assert_eq!(severity, Severity::Recommended);
    let severity: Severity = serde_json::from_str("\"info\"").unwrap();
    assert_eq!(severity, Severity::Optional);
}
