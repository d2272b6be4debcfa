use std::fmt::Write;

use crate::error::Result;
use crate::maturity::{level_for_score, maturity_description};
use crate::model::{MAX_LEVEL, MIN_LEVEL, ScanResult};

use super::OutputFormatter;

/// GitHub-flavoured Markdown report, suitable for PR comments and job summaries.
pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, result: &ScanResult) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "# Agent Readiness Score Report").ok();
        writeln!(out).ok();
        writeln!(out, "**Repository:** {}", result.target_directory()).ok();
        writeln!(
            out,
            "**Overall Score:** {:.0}% (Level {})",
            result.overall_score(),
            result.maturity_level()
        )
        .ok();
        writeln!(out, "**Maturity:** {}", result.maturity_label()).ok();
        writeln!(out).ok();

        writeln!(out, "## Pillar Scores").ok();
        writeln!(out).ok();
        writeln!(out, "| Pillar | Score | Level | Passed |").ok();
        writeln!(out, "|--------|-------|-------|--------|").ok();
        for pillar in result.pillars() {
            writeln!(
                out,
                "| {} | {:.0}% | {} | {}/{} |",
                pillar.name(),
                pillar.score(),
                level_for_score(pillar.score()),
                pillar.passed(),
                pillar.total()
            )
            .ok();
        }
        writeln!(out).ok();

        writeln!(out, "## Check Results").ok();
        writeln!(out).ok();
        for level in MIN_LEVEL..=MAX_LEVEL {
            let checks: Vec<_> = result
                .pillars()
                .iter()
                .flat_map(|p| {
                    p.checks()
                        .iter()
                        .filter(move |c| c.level() == level)
                        .map(move |c| (p.name(), c))
                })
                .collect();
            if checks.is_empty() {
                continue;
            }

            writeln!(out, "### Level {level}: {}", maturity_description(level)).ok();
            writeln!(out).ok();
            for (pillar, check) in checks {
                let status = if check.is_passed() { "✅" } else { "❌" };
                writeln!(
                    out,
                    "{status} **{pillar}:** {} - {}",
                    check.name(),
                    check.message()
                )
                .ok();
            }
            writeln!(out).ok();
        }

        Ok(out)
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
