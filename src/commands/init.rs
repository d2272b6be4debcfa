use tracing::info;

use crate::cli::{Cli, InitArgs};
use crate::config::DEFAULT_CONFIG_TEMPLATE;
use crate::error::{ReadinessError, Result};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::write_output;

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Write the commented default configuration to `args.output`, creating missing parent
/// directories.
///
/// # Errors
/// Returns an error if the target is a directory, already exists without `--force`, or
/// cannot be written.
pub fn run_init_impl(args: &InitArgs, cli: &Cli) -> Result<()> {
    let target = args.output.as_path();
    if target.is_dir() {
        return Err(ReadinessError::Config(format!(
            "{} is a directory, expected a file path",
            target.display()
        )));
    }
    let replacing = target.exists();
    if replacing && !args.force {
        return Err(ReadinessError::Config(format!(
            "{} already exists; pass --force to replace it",
            target.display()
        )));
    }

    write_output(Some(target), DEFAULT_CONFIG_TEMPLATE, cli.quiet)?;
    info!(path = %target.display(), replacing, "default configuration written");

    if !cli.quiet {
        let verb = if replacing { "Replaced" } else { "Created" };
        println!("{verb} configuration file: {}", target.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
