use super::*;
use crate::config::Config;
use crate::pillars::default_pillars;

#[test]
fn text_listing_aligns_weights() {
    let config: Config = toml::from_str("[pillars.weights]\nSecurity = 2.0\n").unwrap();
    let pillars = config.configure_pillars(default_pillars());

    let listing = format_pillar_list(&pillars, ListFormat::Text).unwrap();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("Style & Validation"));
    assert!(lines[0].ends_with("weight 1.0"));
    assert!(lines[6].starts_with("Security"));
    assert!(lines[6].ends_with("weight 2.0"));
    let column = lines[0].find("weight").unwrap();
    assert!(lines.iter().all(|l| l.find("weight") == Some(column)));
}

#[test]
fn json_listing() {
    let listing = format_pillar_list(&default_pillars()[..2], ListFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&listing).unwrap();

    assert_eq!(
        value,
        serde_json::json!([
            { "name": "Style & Validation", "weight": 1.0 },
            { "name": "Build System", "weight": 1.0 }
        ])
    );
}

#[test]
fn empty_listing() {
    assert_eq!(format_pillar_list(&[], ListFormat::Text).unwrap(), "");
}
