//! Result types produced by a scan: checks, pillar results and the scan aggregate.

mod check;
mod pillar_result;
mod scan_result;
mod severity;

pub use check::{CheckResult, MAX_LEVEL, MIN_LEVEL};
pub use pillar_result::{DEFAULT_WEIGHT, EMPTY_PILLAR_SCORE, PillarResult, sanitize_weight};
pub use scan_result::ScanResult;
pub use severity::Severity;
