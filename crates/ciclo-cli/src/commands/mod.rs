//! Command handlers for the `ciclo` CLI.
//!
//! Shared loading helpers live here; command-specific logic lives in the
//! submodules.

pub mod calendar;
pub mod snapshot;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use ciclo_calendar::CalendarConfig;
use ciclo_config::{LoadedConfig, UnusedKeyPolicy};

use crate::SourceArgs;

/// Flags that apply to every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOpts {
    pub reference_year: Option<i32>,
    pub strict_keys: bool,
}

impl GlobalOpts {
    /// Explicit `--reference-year`, else the current UTC year.
    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    fn unused_key_policy(&self) -> UnusedKeyPolicy {
        if self.strict_keys {
            UnusedKeyPolicy::Fail
        } else {
            UnusedKeyPolicy::Warn
        }
    }
}

/// Load the raw config tree from layered YAML or a saved envelope.
pub fn load_source(source: &SourceArgs) -> Result<LoadedConfig> {
    if let Some(path) = &source.envelope {
        let (loaded, _saved_at) = ciclo_config::load_envelope(path)?;
        return Ok(loaded);
    }
    let path_refs: Vec<&str> = source.config_paths.iter().map(|s| s.as_str()).collect();
    ciclo_config::load_layered_yaml(&path_refs)
}

/// Load, lint and validate a calendar configuration.
pub fn load_calendar(opts: &GlobalOpts, source: &SourceArgs) -> Result<(LoadedConfig, CalendarConfig)> {
    let loaded = load_source(source)?;
    ciclo_config::report_unused_keys(&loaded.config_json, opts.unused_key_policy())?;

    let file = loaded.calendar_file()?;
    let reference_year = opts.reference_year();
    let config = file
        .into_config(reference_year)
        .context("CALENDAR_CONFIG_INVALID")?;

    tracing::debug!(
        year = config.year().value(),
        reference_year,
        weekly = config.cycle().is_weekly(),
        cycle_len = config.cycle().len(),
        "calendar config validated"
    );
    Ok((loaded, config))
}
