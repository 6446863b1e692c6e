//! The Odds API (v4) adapter.
//!
//! Fetches head-to-head tennis prices for one sport key and emits one raw
//! candidate per (event, bookmaker):
//!
//! ```text
//! GET {base}/sports/tennis_atp/odds?regions=us,eu&markets=h2h&oddsFormat=decimal&apiKey=...
//!
//! event "Novak Djokovic" vs "Carlos Alcaraz"
//!   pinnacle  h2h: Alcaraz 1.80, Djokovic 2.10  -> RawQuote(pinnacle, Djokovic 2.10, Alcaraz 1.80)
//!   bet365    h2h: Djokovic 1.90, Alcaraz 2.05  -> RawQuote(bet365,   Djokovic 1.90, Alcaraz 2.05)
//! ```
//!
//! Outcomes are matched to players by name, never by position.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tennis_odds_core::{RawOdds, RawQuote, TheOddsApiConfig};
use tracing::{debug, info};

use crate::error::{Result, SourceError};
use crate::source::OddsSource;

/// Production API root.
pub const THE_ODDS_API_URL: &str = "https://api.the-odds-api.com/v4";

/// Market key for match-winner prices.
const H2H_MARKET: &str = "h2h";

/// Header reporting the remaining monthly quota.
const REQUESTS_REMAINING_HEADER: &str = "x-requests-remaining";

const UNKNOWN_QUOTA: u64 = u64::MAX;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ApiEvent {
    #[serde(default)]
    sport_title: Option<String>,
    #[serde(default)]
    commence_time: Option<String>,
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<ApiBookmaker>,
}

#[derive(Debug, Deserialize)]
struct ApiBookmaker {
    key: String,
    #[serde(default)]
    last_update: Option<String>,
    #[serde(default)]
    markets: Vec<ApiMarket>,
}

#[derive(Debug, Deserialize)]
struct ApiMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<ApiOutcome>,
}

#[derive(Debug, Deserialize)]
struct ApiOutcome {
    name: String,
    price: Decimal,
}

impl ApiBookmaker {
    fn h2h_price(&self, player: &str) -> Option<Decimal> {
        self.markets
            .iter()
            .find(|m| m.key == H2H_MARKET)?
            .outcomes
            .iter()
            .find(|o| o.name == player)
            .map(|o| o.price)
    }
}

/// Converts API events into raw candidates.
///
/// A bookmaker without an h2h price for a player still yields a candidate;
/// validation rejects it with the missing field.
fn events_to_candidates(events: &[ApiEvent], source_url: &str) -> Vec<RawQuote> {
    let mut candidates = Vec::new();

    for event in events {
        let (match_date, match_time) = event
            .commence_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| {
                (
                    Some(t.format("%Y-%m-%d").to_string()),
                    Some(t.format("%H:%M").to_string()),
                )
            })
            .unwrap_or((None, None));

        for bookmaker in &event.bookmakers {
            candidates.push(RawQuote {
                timestamp: bookmaker.last_update.clone(),
                bookmaker: Some(bookmaker.key.clone()),
                tournament: event.sport_title.clone(),
                player1: Some(event.home_team.clone()),
                player2: Some(event.away_team.clone()),
                odds_player1: bookmaker.h2h_price(&event.home_team).map(RawOdds::from),
                odds_player2: bookmaker.h2h_price(&event.away_team).map(RawOdds::from),
                match_date: match_date.clone(),
                match_time: match_time.clone(),
                source_url: Some(source_url.to_string()),
            });
        }
    }

    candidates
}

// =============================================================================
// TheOddsApiSource
// =============================================================================

/// The Odds API client for a single sport key.
pub struct TheOddsApiSource {
    name: String,
    sport: String,
    base_url: String,
    regions: String,
    api_key: SecretString,
    http: Client,
    requests_remaining: AtomicU64,
}

impl std::fmt::Debug for TheOddsApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheOddsApiSource")
            .field("sport", &self.sport)
            .field("base_url", &self.base_url)
            .field("regions", &self.regions)
            .finish_non_exhaustive()
    }
}

impl TheOddsApiSource {
    /// Creates a client for one sport key.
    ///
    /// # Errors
    /// Returns [`SourceError::Configuration`] when no API key is configured,
    /// or a network error if the HTTP client cannot be built.
    pub fn new(config: &TheOddsApiConfig, sport: impl Into<String>) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SourceError::Configuration("the_odds_api.api_key is not set".to_string())
            })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tennis-odds/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {e}")))?;

        let sport = sport.into();
        Ok(Self {
            name: format!("the-odds-api:{sport}"),
            sport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            regions: config.regions.clone(),
            api_key: SecretString::from(api_key.to_string()),
            http,
            requests_remaining: AtomicU64::new(UNKNOWN_QUOTA),
        })
    }

    /// One client per configured sport.
    ///
    /// # Errors
    /// See [`TheOddsApiSource::new`].
    pub fn all_from_config(config: &TheOddsApiConfig) -> Result<Vec<Self>> {
        config
            .sports
            .iter()
            .map(|sport| Self::new(config, sport.as_str()))
            .collect()
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sport key this client fetches.
    #[must_use]
    pub fn sport(&self) -> &str {
        &self.sport
    }

    /// Odds URL without credentials.
    #[must_use]
    pub fn odds_url(&self) -> String {
        format!("{}/sports/{}/odds", self.base_url, self.sport)
    }

    /// Remaining monthly quota as reported by the last response, if any.
    #[must_use]
    pub fn requests_remaining(&self) -> Option<u64> {
        match self.requests_remaining.load(Ordering::Relaxed) {
            UNKNOWN_QUOTA => None,
            n => Some(n),
        }
    }

    fn record_quota(&self, response: &reqwest::Response) {
        let remaining = response
            .headers()
            .get(REQUESTS_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n >= 0.0);

        if let Some(remaining) = remaining {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let remaining = remaining as u64;
            self.requests_remaining.store(remaining, Ordering::Relaxed);
            info!(sport = %self.sport, remaining, "The Odds API quota");
        }
    }

    /// Handles API response, converting errors appropriately.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<ApiEvent>> {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(SourceError::rate_limited(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::from_status(status.as_u16(), text));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl OddsSource for TheOddsApiSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self) -> String {
        self.odds_url()
    }

    async fn fetch(&self) -> Result<Vec<RawQuote>> {
        let url = self.odds_url();
        debug!(sport = %self.sport, "GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("apiKey", self.api_key.expose_secret()),
                ("regions", self.regions.as_str()),
                ("markets", H2H_MARKET),
                ("oddsFormat", "decimal"),
            ])
            .send()
            .await?;

        self.record_quota(&response);
        let events = self.handle_response(response).await?;
        let candidates = events_to_candidates(&events, &url);

        debug!(
            sport = %self.sport,
            events = events.len(),
            candidates = candidates.len(),
            "Fetched The Odds API events"
        );

        Ok(candidates)
    }
}
