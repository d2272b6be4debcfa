use std::fmt::Write;

use serde_json::json;

use crate::cli::{Cli, ListFormat, PillarsArgs};
use crate::error::Result;
use crate::pillar::Pillar;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{load_config, select_pillars, write_output};

#[must_use]
pub fn run_pillars(args: &PillarsArgs, cli: &Cli) -> i32 {
    match run_pillars_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// List the pillars a default scan would run, with their effective weights.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or the listing cannot be serialized.
pub fn run_pillars_impl(args: &PillarsArgs, cli: &Cli) -> Result<()> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let pillars = select_pillars(&[], &config)?;
    let listing = format_pillar_list(&pillars, args.format)?;
    write_output(None, &listing, cli.quiet)
}

/// Render pillar names and weights.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn format_pillar_list(pillars: &[Box<dyn Pillar>], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Json => {
            let entries: Vec<_> = pillars
                .iter()
                .map(|p| json!({ "name": p.name(), "weight": p.weight() }))
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&entries)?))
        }
        ListFormat::Text => {
            let width = pillars
                .iter()
                .map(|p| p.name().chars().count())
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            for pillar in pillars {
                writeln!(
                    out,
                    "{:<width$}  weight {:.1}",
                    pillar.name(),
                    pillar.weight()
                )
                .ok();
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
#[path = "pillars_tests.rs"]
mod tests;
