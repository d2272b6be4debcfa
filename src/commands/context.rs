use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::{ReadinessError, Result};
use crate::pillar::Pillar;
use crate::pillars::{default_pillars, find_pillar};

/// Load the effective configuration.
///
/// # Errors
/// Returns an error if the configuration file cannot be read, parsed or validated.
pub fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        debug!("configuration loading disabled");
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    let loaded = config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))?;
    Ok(loaded.config)
}

/// Pillars to run for this invocation.
///
/// Names given on the command line are run even if the configuration disables them.
/// Without names, every pillar the configuration leaves enabled runs. Configured weights
/// apply either way.
///
/// # Errors
/// Returns [`ReadinessError::UnknownPillar`] for the first name that matches no pillar.
pub fn select_pillars(names: &[String], config: &Config) -> Result<Vec<Box<dyn Pillar>>> {
    if names.is_empty() {
        return Ok(config.configure_pillars(default_pillars()));
    }
    names
        .iter()
        .map(|name| {
            find_pillar(name)
                .map(|p| config.apply_weight(p))
                .ok_or_else(|| ReadinessError::UnknownPillar(name.clone()))
        })
        .collect()
}

/// Write `content` to `output_path`, or to stdout unless quiet.
///
/// # Errors
/// Returns an error if the file or its parent directories cannot be written.
pub fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        debug!(path = %path.display(), "report written");
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
