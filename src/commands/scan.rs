use tracing::info;

use crate::cli::{Cli, ScanArgs};
use crate::error::Result;
use crate::output::ScanProgress;
use crate::scanner::Scanner;
use crate::{EXIT_BELOW_THRESHOLD, EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{load_config, select_pillars, write_output};

#[must_use]
pub fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match run_scan_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan the target, render the report and decide the exit code.
///
/// # Errors
/// Returns an error for configuration problems, unknown pillar names, an invalid target,
/// a failing pillar, or when the report cannot be written.
pub fn run_scan_impl(args: &ScanArgs, cli: &Cli) -> Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let pillars = select_pillars(&args.pillars, &config)?;

    let mut scanner = Scanner::new();
    scanner.register_pillars(pillars);

    let progress = ScanProgress::new(scanner.pillar_count() as u64, cli.quiet);
    let scanned = scanner.scan_with_progress(&args.path, |pillar| progress.tick(pillar));
    progress.finish();
    let result = scanned?;

    let filtered;
    let shown = match args.level {
        Some(level) => {
            filtered = result.filter_by_level(level);
            &filtered
        }
        None => &result,
    };

    let format = args.format.unwrap_or(config.scan.format);
    let report = format.formatter(cli.color.into(), cli.verbose).format(shown)?;
    write_output(args.output.as_deref(), &report, cli.quiet)?;

    let min_level = args.min_level.unwrap_or(config.scan.min_level);
    info!(
        level = result.maturity_level(),
        min_level, "comparing maturity with pass level"
    );
    Ok(exit_code_for(result.maturity_level(), min_level))
}

/// Exit code for a repository at `level` against the pass level `min_level`.
#[must_use]
pub const fn exit_code_for(level: u8, min_level: u8) -> i32 {
    if level >= min_level {
        EXIT_SUCCESS
    } else {
        EXIT_BELOW_THRESHOLD
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
