//! The capability every odds source provides.

use async_trait::async_trait;
use tennis_odds_core::RawQuote;

use crate::error::Result;

/// A place odds can be fetched from.
///
/// Implementations perform a single fetch; retries, backoff and rate limiting
/// are applied around [`fetch`](OddsSource::fetch) by
/// [`AcquisitionPolicy`](crate::AcquisitionPolicy).
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Short identifier used in logs and failure records.
    fn name(&self) -> &str;

    /// Key the rate limiter spaces calls by, typically the request URL.
    fn endpoint(&self) -> String;

    /// Fetches one batch of raw candidates.
    ///
    /// # Errors
    /// Returns a [`SourceError`](crate::SourceError) when the fetch fails.
    async fn fetch(&self) -> Result<Vec<RawQuote>>;
}
