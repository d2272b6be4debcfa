//! Score to maturity-level classification, shared by the scanner and every renderer.

use crate::model::PillarResult;

/// Lower bounds (inclusive) of levels 2 through 5.
const THRESHOLDS: [f64; 4] = [40.0, 60.0, 80.0, 95.0];

const LABELS: [&str; 5] = [
    "Initial",
    "Developing",
    "Defined",
    "Managed",
    "Optimizing",
];

const DESCRIPTIONS: [&str; 5] = [
    "Initial - Ad-hoc processes",
    "Developing - Basic processes in place",
    "Defined - Documented and standardized",
    "Managed - Measured and controlled",
    "Optimizing - Continuous improvement",
];

/// Maps a 0-100 score onto maturity level 1-5.
#[must_use]
pub fn level_for_score(score: f64) -> u8 {
    let mut level = 1;
    for threshold in THRESHOLDS {
        if score >= threshold {
            level += 1;
        }
    }
    level
}

#[must_use]
pub fn maturity_label(level: u8) -> &'static str {
    level_index(level).map_or("Unknown", |i| LABELS[i])
}

#[must_use]
pub fn maturity_description(level: u8) -> &'static str {
    level_index(level).map_or("Unknown", |i| DESCRIPTIONS[i])
}

fn level_index(level: u8) -> Option<usize> {
    (1..=5).contains(&level).then(|| usize::from(level - 1))
}

/// Weighted mean of pillar scores, kept within `0..=100`; 0 when the total weight is 0.
#[must_use]
pub fn weighted_score(pillars: &[PillarResult]) -> f64 {
    let total_weight: f64 = pillars.iter().map(PillarResult::weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = pillars.iter().map(|p| p.score() * p.weight()).sum();
    (weighted / total_weight).clamp(0.0, 100.0)
}

#[cfg(test)]
#[path = "maturity_tests.rs"]
mod tests;
