use std::fmt::Write;

use crate::error::Result;
use crate::maturity::level_for_score;
use crate::model::{CheckResult, PillarResult, ScanResult, Severity};

use super::OutputFormatter;

const MAX_FAILED_SHOWN: usize = 10;
const MAX_RECOMMENDATIONS: usize = 5;
const LEVEL_CELLS: u8 = 5;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(format!("Unknown color mode: {s}")),
        }
    }
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human-readable terminal report.
pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose > 0` every check is listed, not only the failures.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn score_color(score: f64) -> &'static str {
        if score >= 80.0 {
            ansi::GREEN
        } else if score >= 60.0 {
            ansi::YELLOW
        } else {
            ansi::RED
        }
    }

    const fn status_icon(check: &CheckResult) -> &'static str {
        if check.is_passed() { "✓" } else { "✗" }
    }

    fn write_header(&self, result: &ScanResult, out: &mut String) {
        writeln!(out).ok();
        writeln!(out, "{}", self.paint("Agent Readiness Score", ansi::CYAN)).ok();
        writeln!(out).ok();
        writeln!(
            out,
            "{} {}",
            self.paint("Repository:", ansi::BOLD),
            result.target_directory()
        )
        .ok();
        let score = format!("{:.0}%", result.overall_score());
        writeln!(
            out,
            "{} {} (Level {})",
            self.paint("Overall Score:", ansi::BOLD),
            self.paint(&score, ansi::CYAN),
            result.maturity_level()
        )
        .ok();
        writeln!(
            out,
            "{} {}",
            self.paint("Maturity:", ansi::BOLD),
            result.maturity_label()
        )
        .ok();
        writeln!(out).ok();
    }

    fn write_pillar_table(&self, result: &ScanResult, out: &mut String) {
        let width = result
            .pillars()
            .iter()
            .map(|p| p.name().chars().count())
            .max()
            .unwrap_or(0)
            .max("Pillar".len());

        writeln!(out, "{}", self.paint("Pillar Scores", ansi::BOLD)).ok();
        writeln!(
            out,
            "{:<width$}  {:>5}  {:>5}  {:<8}  {:>6}",
            "Pillar", "Score", "Level", "Progress", "Checks"
        )
        .ok();
        for pillar in result.pillars() {
            let score = format!("{:>5}", format!("{:.0}%", pillar.score()));
            let level = level_for_score(pillar.score());
            writeln!(
                out,
                "{:<width$}  {}  {:>5}  {:<8}  {:>6}",
                pillar.name(),
                self.paint(&score, Self::score_color(pillar.score())),
                level,
                level_bar(level),
                format!("{}/{}", pillar.passed(), pillar.total()),
            )
            .ok();
        }
        writeln!(out).ok();
    }

    fn write_failures(&self, result: &ScanResult, out: &mut String) {
        let failed: Vec<(&str, &CheckResult)> = result
            .pillars()
            .iter()
            .flat_map(|p| p.failed_checks().map(move |c| (p.name(), c)))
            .collect();
        if failed.is_empty() {
            return;
        }

        writeln!(out, "{}", self.paint("Failed Checks:", ansi::RED)).ok();
        for (pillar, check) in failed.iter().take(MAX_FAILED_SHOWN) {
            writeln!(
                out,
                "  {} [{pillar}] {}: {}",
                self.paint("✗", ansi::RED),
                check.name(),
                check.message()
            )
            .ok();
        }
        if failed.len() > MAX_FAILED_SHOWN {
            writeln!(out, "  ... and {} more", failed.len() - MAX_FAILED_SHOWN).ok();
        }
        writeln!(out).ok();
    }

    fn write_all_checks(&self, result: &ScanResult, out: &mut String) {
        writeln!(out, "{}", self.paint("All Checks:", ansi::BOLD)).ok();
        for pillar in result.pillars() {
            writeln!(out, "  {}", pillar.name()).ok();
            for check in pillar.checks() {
                let color = if check.is_passed() {
                    ansi::GREEN
                } else {
                    ansi::RED
                };
                writeln!(
                    out,
                    "    {} L{} {} ({}): {}",
                    self.paint(Self::status_icon(check), color),
                    check.level(),
                    check.name(),
                    check.severity(),
                    check.message()
                )
                .ok();
            }
        }
        writeln!(out).ok();
    }

    fn write_recommendations(&self, result: &ScanResult, out: &mut String) {
        let recommendations = recommendations(result);
        if recommendations.is_empty() {
            return;
        }
        writeln!(out, "{}", self.paint("Recommendations:", ansi::YELLOW)).ok();
        for (i, rec) in recommendations.iter().take(MAX_RECOMMENDATIONS).enumerate() {
            writeln!(out, "  {}. {rec}", i + 1).ok();
        }
        writeln!(out).ok();
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &ScanResult) -> Result<String> {
        let mut out = String::new();
        self.write_header(result, &mut out);
        self.write_pillar_table(result, &mut out);
        if self.verbose > 0 {
            self.write_all_checks(result, &mut out);
        }
        self.write_failures(result, &mut out);
        self.write_recommendations(result, &mut out);
        Ok(out)
    }
}

/// `level` filled cells followed by empty ones, five in total.
fn level_bar(level: u8) -> String {
    let filled = level.min(LEVEL_CELLS);
    format!(
        "{}{}",
        "█".repeat(usize::from(filled)),
        "░".repeat(usize::from(LEVEL_CELLS - filled))
    )
}

/// One suggestion per pillar with failures, driven by the most severe failure class.
fn recommendations(result: &ScanResult) -> Vec<String> {
    result
        .pillars()
        .iter()
        .filter_map(recommendation)
        .collect()
}

fn recommendation(pillar: &PillarResult) -> Option<String> {
    let failed: Vec<&CheckResult> = pillar.failed_checks().collect();
    if failed.is_empty() {
        return None;
    }
    let count = |severity: Severity| failed.iter().filter(|c| c.severity() == severity).count();
    let name = pillar.name();
    let critical = count(Severity::Critical);
    let required = count(Severity::Required);
    Some(if critical > 0 {
        format!("[{name}] Address {critical} critical issues")
    } else if required > 0 {
        format!("[{name}] Implement {required} required checks")
    } else {
        format!("[{name}] Consider {} improvements", failed.len())
    })
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
