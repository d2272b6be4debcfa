//! Scores how ready a repository is for autonomous AI-agent collaboration.
//!
//! A [`Scanner`] runs a set of [`Pillar`]s against a directory. Each pillar returns
//! pass/fail [`model::CheckResult`]s, which roll up into per-pillar scores, a weighted
//! overall score and a maturity level from 1 to 5.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod maturity;
pub mod model;
pub mod output;
pub mod pillar;
pub mod pillars;
pub mod scanner;

pub use error::{ReadinessError, Result};
pub use model::{CheckResult, PillarResult, ScanResult, Severity};
pub use pillar::{Pillar, Weighted};
pub use scanner::Scanner;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_BELOW_THRESHOLD: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
