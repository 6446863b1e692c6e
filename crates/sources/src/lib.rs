//! Odds acquisition: source adapters plus retry, backoff and rate limiting.
//!
//! # Modules
//!
//! - [`source`]: the [`OddsSource`] capability
//! - [`acquisition`]: [`AcquisitionPolicy`] and [`acquire`]
//! - [`demo`]: synthetic odds
//! - [`the_odds_api`]: The Odds API v4 adapter
//! - [`cycle`]: one pass over every configured source
//! - [`error`]: [`SourceError`] and [`AcquisitionError`]
//!
//! # Example
//!
//! ```no_run
//! use tennis_odds_core::ConfigLoader;
//! use tennis_odds_sources::AcquisitionCycle;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ConfigLoader::load()?;
//! let cycle = AcquisitionCycle::from_config(&config)?;
//! let outcome = cycle.run().await;
//! println!("{} quotes, {} failed sources", outcome.quotes.len(), outcome.failures.len());
//! # Ok(())
//! # }
//! ```

pub mod acquisition;
pub mod cycle;
pub mod demo;
pub mod error;
pub mod source;
pub mod the_odds_api;

pub use acquisition::{acquire, AcquisitionPolicy, DEFAULT_ENDPOINT};
pub use cycle::{AcquisitionCycle, CycleOutcome, SourceFailure, SourceRejection};
pub use demo::DemoSource;
pub use error::{AcquisitionError, Result, SourceError};
pub use source::OddsSource;
pub use the_odds_api::{TheOddsApiSource, THE_ODDS_API_URL};
