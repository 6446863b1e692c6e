//! Shared plumbing for every command: configuration, one acquisition cycle,
//! and JSON output on stdout.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tennis_odds_core::{AppConfig, ConfigLoader};
use tennis_odds_sources::{AcquisitionCycle, CycleOutcome};
use tracing::{info, warn};

/// Flags accepted by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: String,
    pub profile: Option<String>,
    pub seed: Option<u64>,
    pub pretty: bool,
}

impl GlobalArgs {
    /// Loads configuration and applies command-line overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.profile {
            Some(profile) => ConfigLoader::load_with_profile(&self.config, profile),
            None => ConfigLoader::load_from(&self.config),
        }
        .with_context(|| format!("failed to load configuration from {}", self.config))?;

        if let Some(seed) = self.seed {
            config.sources.demo.seed = Some(seed);
        }

        Ok(config)
    }
}

/// Runs one acquisition cycle over every enabled source.
///
/// Fails only when sources were attempted and none delivered a quote.
pub async fn acquire_quotes(config: &AppConfig) -> Result<CycleOutcome> {
    let cycle = AcquisitionCycle::from_config(config)?;
    info!(sources = ?cycle.source_names(), "Starting acquisition");

    let outcome = cycle.run().await;

    for failure in &outcome.failures {
        warn!(
            source = %failure.source,
            attempts = failure.attempts,
            error = %failure.error,
            "Source failed"
        );
    }

    if !outcome.has_quotes() && !outcome.failures.is_empty() {
        bail!(
            "no quotes acquired: all {} source(s) failed",
            outcome.failures.len()
        );
    }

    Ok(outcome)
}

/// Writes a value to stdout as JSON.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, value, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
