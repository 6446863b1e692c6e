//! One acquisition pass over every configured source.
//!
//! Sources run one after another under a shared [`AcquisitionPolicy`]. A
//! source that fails after retries is recorded and skipped; the rest still
//! contribute. All candidates are validated with one capture time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tennis_odds_core::{validate_batch, AppConfig, Quote, RejectedQuote};
use tracing::{info, warn};

use crate::acquisition::AcquisitionPolicy;
use crate::demo::DemoSource;
use crate::error::{AcquisitionError, SourceError};
use crate::source::OddsSource;
use crate::the_odds_api::TheOddsApiSource;

/// A source that produced nothing this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    /// Source name.
    pub source: String,
    /// Attempts made.
    pub attempts: u32,
    /// Last error, rendered.
    pub error: String,
}

impl SourceFailure {
    fn new(source: &str, err: &AcquisitionError) -> Self {
        Self {
            source: source.to_string(),
            attempts: err.attempts,
            error: err.source.to_string(),
        }
    }
}

/// Rejected candidate, attributed to its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRejection {
    /// Source name.
    pub source: String,
    /// The rejection.
    #[serde(flatten)]
    pub rejection: RejectedQuote,
}

/// Result of one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleOutcome {
    /// When candidates were captured.
    pub captured_at: Option<DateTime<Utc>>,
    /// Validated quotes from every source, in source order.
    pub quotes: Vec<Quote>,
    /// Candidates that failed validation.
    pub rejections: Vec<SourceRejection>,
    /// Sources that could not be fetched.
    pub failures: Vec<SourceFailure>,
}

impl CycleOutcome {
    /// True when at least one source delivered data.
    #[must_use]
    pub fn has_quotes(&self) -> bool {
        !self.quotes.is_empty()
    }
}

/// Runs every source through the acquisition policy.
pub struct AcquisitionCycle {
    sources: Vec<Box<dyn OddsSource>>,
    policy: AcquisitionPolicy,
}

impl std::fmt::Debug for AcquisitionCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionCycle")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("policy", &self.policy)
            .finish()
    }
}

impl AcquisitionCycle {
    /// Creates an empty cycle.
    #[must_use]
    pub fn new(policy: AcquisitionPolicy) -> Self {
        Self {
            sources: Vec::new(),
            policy,
        }
    }

    /// Adds a source.
    #[must_use]
    pub fn with_source(mut self, source: impl OddsSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Builds a cycle with every source enabled in configuration.
    ///
    /// # Errors
    /// Returns [`SourceError::Configuration`] when a source is enabled but
    /// cannot be set up, or when no source is enabled.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let mut cycle = Self::new(AcquisitionPolicy::from_config(&config.acquisition));

        if config.sources.demo.enabled {
            cycle = cycle.with_source(DemoSource::from_config(&config.sources.demo));
        }
        if config.sources.the_odds_api.enabled {
            for source in TheOddsApiSource::all_from_config(&config.sources.the_odds_api)? {
                cycle = cycle.with_source(source);
            }
        }

        if cycle.sources.is_empty() {
            return Err(SourceError::Configuration(
                "no odds source is enabled".to_string(),
            ));
        }

        Ok(cycle)
    }

    /// Names of the registered sources, in run order.
    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetches from every source and validates the candidates.
    pub async fn run(&self) -> CycleOutcome {
        let captured_at = Utc::now();
        let mut outcome = CycleOutcome {
            captured_at: Some(captured_at),
            ..CycleOutcome::default()
        };

        for source in &self.sources {
            let endpoint = source.endpoint();
            match self.policy.run(&endpoint, || source.fetch()).await {
                Ok(candidates) => {
                    let report = validate_batch(candidates, captured_at);
                    info!(
                        source = source.name(),
                        accepted = report.quotes.len(),
                        rejected = report.rejections.len(),
                        "Source fetched"
                    );
                    outcome.quotes.extend(report.quotes);
                    outcome
                        .rejections
                        .extend(report.rejections.into_iter().map(|rejection| {
                            SourceRejection {
                                source: source.name().to_string(),
                                rejection,
                            }
                        }));
                }
                Err(err) => {
                    warn!(source = source.name(), error = %err, "Source skipped this cycle");
                    outcome.failures.push(SourceFailure::new(source.name(), &err));
                }
            }
        }

        info!(
            sources = self.sources.len(),
            quotes = outcome.quotes.len(),
            rejections = outcome.rejections.len(),
            failures = outcome.failures.len(),
            "Acquisition cycle complete"
        );

        outcome
    }
}
