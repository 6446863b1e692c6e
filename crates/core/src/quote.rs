//! Canonical quote record and its validation.
//!
//! Source adapters emit [`RawQuote`] candidates, which may be missing fields
//! or carry malformed prices. [`validate`] turns a candidate into a [`Quote`]
//! or a [`Rejection`] tag; [`validate_batch`] applies it to a whole
//! acquisition batch so that bad rows are skipped rather than aborting it.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::names::{clean_player_name, normalize_player_name};
use crate::odds;

/// Timestamp layout used by the scraping sources.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Raw Candidates
// =============================================================================

/// A price as delivered by a source: a number, or text that may hold a
/// decimal (`"1.85"`) or fractional (`"17/20"`) price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOdds {
    /// Numeric price.
    Decimal(Decimal),
    /// Textual price that still needs parsing.
    Text(String),
}

impl RawOdds {
    /// Parses the price into decimal odds.
    ///
    /// Fractional prices are converted as `numerator / denominator + 1`.
    /// Returns `None` when the value is not a number in either format.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Text(text) => parse_odds_text(text),
        }
    }
}

impl From<Decimal> for RawOdds {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for RawOdds {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for RawOdds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

fn parse_odds_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some((num, den)) = text.split_once('/') {
        let num = Decimal::from_str(num.trim()).ok()?;
        let den = Decimal::from_str(den.trim()).ok()?;
        return num.checked_div(den)?.checked_add(Decimal::ONE);
    }

    Decimal::from_str(text).ok()
}

/// One bookmaker's price on one match, before validation.
///
/// Every field is optional so that partially scraped rows deserialize and
/// can be rejected with a reason instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawQuote {
    /// Capture time, RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC).
    pub timestamp: Option<String>,
    /// Bookmaker identifier.
    pub bookmaker: Option<String>,
    /// Tournament name.
    pub tournament: Option<String>,
    /// First player as printed by the bookmaker.
    pub player1: Option<String>,
    /// Second player as printed by the bookmaker.
    pub player2: Option<String>,
    /// Price on the first player.
    pub odds_player1: Option<RawOdds>,
    /// Price on the second player.
    pub odds_player2: Option<RawOdds>,
    /// Scheduled date.
    pub match_date: Option<String>,
    /// Scheduled time.
    pub match_time: Option<String>,
    /// Page or endpoint the price came from.
    #[serde(alias = "url")]
    pub source_url: Option<String>,
}

impl RawQuote {
    /// Creates a candidate with the fields validation requires.
    #[must_use]
    pub fn new(
        bookmaker: impl Into<String>,
        player1: impl Into<String>,
        player2: impl Into<String>,
        odds_player1: impl Into<RawOdds>,
        odds_player2: impl Into<RawOdds>,
    ) -> Self {
        Self {
            bookmaker: Some(bookmaker.into()),
            player1: Some(player1.into()),
            player2: Some(player2.into()),
            odds_player1: Some(odds_player1.into()),
            odds_player2: Some(odds_player2.into()),
            ..Default::default()
        }
    }

    /// Sets the capture time.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp.to_rfc3339());
        self
    }

    /// Sets the tournament.
    #[must_use]
    pub fn with_tournament(mut self, tournament: impl Into<String>) -> Self {
        self.tournament = Some(tournament.into());
        self
    }

    /// Sets the scheduled date and time.
    #[must_use]
    pub fn with_schedule(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.match_date = Some(date.into());
        self.match_time = Some(time.into());
        self
    }

    /// Sets the provenance URL.
    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

// =============================================================================
// Rejections
// =============================================================================

/// Why a candidate was not accepted as a [`Quote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Bookmaker identifier missing or blank.
    #[error("bookmaker identifier is missing")]
    MissingBookmaker,

    /// A player name is missing or blank.
    #[error("{field} is missing")]
    MissingPlayer {
        /// `player1` or `player2`.
        field: &'static str,
    },

    /// Both names normalize to the same player.
    #[error("player1 and player2 are the same player: {name}")]
    SamePlayers {
        /// Normalized name.
        name: String,
    },

    /// A price is missing.
    #[error("{field} is missing")]
    MissingOdds {
        /// `odds_player1` or `odds_player2`.
        field: &'static str,
    },

    /// A price could not be read as a number.
    #[error("{field} is not numeric: {value:?}")]
    NonNumericOdds {
        /// `odds_player1` or `odds_player2`.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A price is at or below 1.0.
    #[error("{field} out of range: {odds} (must be > 1.0)")]
    OddsOutOfRange {
        /// `odds_player1` or `odds_player2`.
        field: &'static str,
        /// The parsed value.
        odds: Decimal,
    },
}

impl Rejection {
    /// Short tag for logs and reports.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MissingBookmaker => "missing_bookmaker",
            Self::MissingPlayer { .. } => "missing_player",
            Self::SamePlayers { .. } => "same_players",
            Self::MissingOdds { .. } => "missing_odds",
            Self::NonNumericOdds { .. } => "non_numeric_odds",
            Self::OddsOutOfRange { .. } => "odds_out_of_range",
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A validated bookmaker quote on one match.
///
/// Fields are read-only; the only way to obtain a `Quote` is [`validate`],
/// so both prices are always strictly greater than 1.0 and the two players
/// are distinct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    timestamp: DateTime<Utc>,
    bookmaker: String,
    tournament: String,
    player1: String,
    player2: String,
    odds_player1: Decimal,
    odds_player2: Decimal,
    match_date: Option<String>,
    match_time: Option<String>,
    source_url: Option<String>,
}

impl Quote {
    /// Capture time.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Bookmaker identifier.
    #[must_use]
    pub fn bookmaker(&self) -> &str {
        &self.bookmaker
    }

    /// Tournament name, possibly empty.
    #[must_use]
    pub fn tournament(&self) -> &str {
        &self.tournament
    }

    /// First player (display form).
    #[must_use]
    pub fn player1(&self) -> &str {
        &self.player1
    }

    /// Second player (display form).
    #[must_use]
    pub fn player2(&self) -> &str {
        &self.player2
    }

    /// Decimal price on the first player.
    #[must_use]
    pub fn odds_player1(&self) -> Decimal {
        self.odds_player1
    }

    /// Decimal price on the second player.
    #[must_use]
    pub fn odds_player2(&self) -> Decimal {
        self.odds_player2
    }

    /// Scheduled date, if known.
    #[must_use]
    pub fn match_date(&self) -> Option<&str> {
        self.match_date.as_deref()
    }

    /// Scheduled time, if known.
    #[must_use]
    pub fn match_time(&self) -> Option<&str> {
        self.match_time.as_deref()
    }

    /// Provenance URL, if known.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Identity forms of both players, in display order.
    #[must_use]
    pub fn normalized_players(&self) -> (String, String) {
        (
            normalize_player_name(&self.player1),
            normalize_player_name(&self.player2),
        )
    }

    /// Bookmaker margin of this quote, as a percentage.
    #[must_use]
    pub fn margin(&self) -> Decimal {
        odds::margin_unchecked(self.odds_player1, self.odds_player2)
    }

    /// Implied probability of each player, as percentages.
    #[must_use]
    pub fn implied_probabilities(&self) -> (Decimal, Decimal) {
        let hundred = Decimal::ONE_HUNDRED;
        (
            hundred / self.odds_player1,
            hundred / self.odds_player2,
        )
    }
}

// =============================================================================
// Validation
// =============================================================================

fn required_text(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn required_odds(value: Option<&RawOdds>, field: &'static str) -> Result<Decimal, Rejection> {
    let raw = value.ok_or(Rejection::MissingOdds { field })?;
    let odds = raw.to_decimal().ok_or_else(|| Rejection::NonNumericOdds {
        field,
        value: raw.to_string(),
    })?;

    if odds <= Decimal::ONE {
        return Err(Rejection::OddsOutOfRange { field, odds });
    }
    Ok(odds)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validates a raw candidate into a [`Quote`].
///
/// `captured_at` is used when the candidate carries no readable timestamp.
///
/// # Errors
/// Returns the first [`Rejection`] that applies, checked in the order
/// bookmaker, players, prices.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use rust_decimal_macros::dec;
/// use tennis_odds_core::{validate, RawQuote};
///
/// let raw = RawQuote::new("pinnacle", "Sinner J.", "Medvedev D.", dec!(1.45), "11/4");
/// let quote = validate(raw, Utc::now()).unwrap();
/// assert_eq!(quote.odds_player2(), dec!(3.75));
/// ```
pub fn validate(candidate: RawQuote, captured_at: DateTime<Utc>) -> Result<Quote, Rejection> {
    let bookmaker = required_text(candidate.bookmaker.as_ref())
        .ok_or(Rejection::MissingBookmaker)?
        .to_string();

    let player1 = required_text(candidate.player1.as_ref())
        .map(clean_player_name)
        .filter(|s| !s.is_empty())
        .ok_or(Rejection::MissingPlayer { field: "player1" })?;
    let player2 = required_text(candidate.player2.as_ref())
        .map(clean_player_name)
        .filter(|s| !s.is_empty())
        .ok_or(Rejection::MissingPlayer { field: "player2" })?;

    let identity = normalize_player_name(&player1);
    if identity == normalize_player_name(&player2) {
        return Err(Rejection::SamePlayers { name: identity });
    }

    let odds_player1 = required_odds(candidate.odds_player1.as_ref(), "odds_player1")?;
    let odds_player2 = required_odds(candidate.odds_player2.as_ref(), "odds_player2")?;

    let timestamp = candidate
        .timestamp
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(captured_at);

    Ok(Quote {
        timestamp,
        bookmaker,
        tournament: optional_text(candidate.tournament).unwrap_or_default(),
        player1,
        player2,
        odds_player1,
        odds_player2,
        match_date: optional_text(candidate.match_date),
        match_time: optional_text(candidate.match_time),
        source_url: optional_text(candidate.source_url),
    })
}

/// A candidate that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedQuote {
    /// Position of the candidate in its batch.
    pub index: usize,
    /// Bookmaker named by the candidate, if any.
    pub bookmaker: Option<String>,
    /// Why it was rejected.
    pub reason: Rejection,
}

/// Outcome of validating one batch of candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Accepted quotes, in input order.
    pub quotes: Vec<Quote>,
    /// Rejected candidates, in input order.
    pub rejections: Vec<RejectedQuote>,
}

impl ValidationReport {
    /// Number of candidates seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.quotes.len() + self.rejections.len()
    }

    /// Appends another batch's results. Rejection indices stay relative to
    /// their own batch.
    pub fn merge(&mut self, other: ValidationReport) {
        self.quotes.extend(other.quotes);
        self.rejections.extend(other.rejections);
    }
}

/// Validates a batch of candidates, skipping the invalid ones.
#[must_use]
pub fn validate_batch<I>(candidates: I, captured_at: DateTime<Utc>) -> ValidationReport
where
    I: IntoIterator<Item = RawQuote>,
{
    let mut report = ValidationReport::default();

    for (index, candidate) in candidates.into_iter().enumerate() {
        let bookmaker = candidate.bookmaker.clone();
        match validate(candidate, captured_at) {
            Ok(quote) => report.quotes.push(quote),
            Err(reason) => {
                warn!(
                    index,
                    bookmaker = bookmaker.as_deref().unwrap_or("<none>"),
                    reason = reason.tag(),
                    detail = %reason,
                    "Rejected odds candidate"
                );
                report.rejections.push(RejectedQuote {
                    index,
                    bookmaker,
                    reason,
                });
            }
        }
    }

    debug!(
        accepted = report.quotes.len(),
        rejected = report.rejections.len(),
        "Validated candidate batch"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
    }

    fn candidate() -> RawQuote {
        RawQuote::new("oddsportal", "Djokovic N.", "Alcaraz C.", dec!(1.85), dec!(1.95))
            .with_tournament("ATP Australian Open")
    }

    // ==================== Odds Parsing Tests ====================

    #[test]
    fn test_parse_decimal_text() {
        assert_eq!(RawOdds::from(" 1.50 ").to_decimal(), Some(dec!(1.50)));
    }

    #[test]
    fn test_parse_fractional_text() {
        assert_eq!(RawOdds::from("3/2").to_decimal(), Some(dec!(2.5)));
        assert_eq!(RawOdds::from("1/4").to_decimal(), Some(dec!(1.25)));
    }

    #[test]
    fn test_parse_fraction_zero_denominator() {
        assert_eq!(RawOdds::from("3/0").to_decimal(), None);
    }

    #[test]
    fn test_parse_garbage_text() {
        assert_eq!(RawOdds::from("N/A").to_decimal(), None);
        assert_eq!(RawOdds::from("").to_decimal(), None);
        assert_eq!(RawOdds::from("evens").to_decimal(), None);
    }

    #[test]
    fn test_raw_quote_deserializes_mixed_odds() {
        let json = serde_json::json!({
            "bookmaker": "bet365",
            "player1": "Fritz T.",
            "player2": "Paul T.",
            "odds_player1": 1.72,
            "odds_player2": "21/10",
            "url": "https://example.com/match/1"
        });

        let raw: RawQuote = serde_json::from_value(json).unwrap();
        assert_eq!(raw.odds_player1, Some(RawOdds::Decimal(dec!(1.72))));
        assert_eq!(raw.odds_player2, Some(RawOdds::Text("21/10".to_string())));
        assert_eq!(raw.source_url.as_deref(), Some("https://example.com/match/1"));

        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.odds_player2(), dec!(3.1));
    }

    #[test]
    fn test_raw_quote_deserializes_with_missing_fields() {
        let raw: RawQuote = serde_json::from_value(serde_json::json!({
            "player1": "Fritz T."
        }))
        .unwrap();
        assert!(raw.bookmaker.is_none());
        assert!(raw.odds_player1.is_none());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_accepts_well_formed_candidate() {
        let quote = validate(candidate(), now()).unwrap();

        assert_eq!(quote.bookmaker(), "oddsportal");
        assert_eq!(quote.player1(), "Djokovic N.");
        assert_eq!(quote.player2(), "Alcaraz C.");
        assert_eq!(quote.odds_player1(), dec!(1.85));
        assert_eq!(quote.tournament(), "ATP Australian Open");
        assert_eq!(quote.timestamp(), now());
    }

    #[test]
    fn test_validate_rejects_odds_below_one() {
        let mut raw = candidate();
        raw.odds_player1 = Some(dec!(0.9).into());

        assert_eq!(
            validate(raw, now()),
            Err(Rejection::OddsOutOfRange {
                field: "odds_player1",
                odds: dec!(0.9)
            })
        );
    }

    #[test]
    fn test_validate_accepts_odds_just_above_one() {
        let mut raw = candidate();
        raw.odds_player1 = Some(dec!(1.01).into());

        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.odds_player1(), dec!(1.01));
    }

    #[test]
    fn test_validate_rejects_odds_of_exactly_one() {
        let mut raw = candidate();
        raw.odds_player2 = Some(Decimal::ONE.into());

        let err = validate(raw, now()).unwrap_err();
        assert_eq!(err.tag(), "odds_out_of_range");
    }

    #[test]
    fn test_validate_rejects_missing_odds_instead_of_zero_filling() {
        let mut raw = candidate();
        raw.odds_player2 = None;

        assert_eq!(
            validate(raw, now()),
            Err(Rejection::MissingOdds {
                field: "odds_player2"
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_numeric_odds() {
        let mut raw = candidate();
        raw.odds_player1 = Some("SUSP".into());

        let err = validate(raw, now()).unwrap_err();
        assert_eq!(
            err,
            Rejection::NonNumericOdds {
                field: "odds_player1",
                value: "SUSP".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_overflowing_fraction() {
        for text in [
            "79228162514264337593543950335/1",
            "100/0.0000000000000000000000000001",
        ] {
            let raw = RawQuote::new("bk", "A", "B", text, "2.0");

            let err = validate(raw, now()).unwrap_err();
            assert_eq!(
                err,
                Rejection::NonNumericOdds {
                    field: "odds_player1",
                    value: text.to_string()
                }
            );
        }
    }

    #[test]
    fn test_validate_batch_survives_overflowing_fraction() {
        let rows = vec![
            RawQuote::new("bk", "A", "B", "79228162514264337593543950335/1", "2.0"),
            candidate(),
        ];

        let report = validate_batch(rows, now());
        assert_eq!(report.quotes.len(), 1);
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.rejections[0].index, 0);
    }

    #[test]
    fn test_validate_rejects_blank_bookmaker() {
        let mut raw = candidate();
        raw.bookmaker = Some("   ".to_string());

        assert_eq!(validate(raw, now()), Err(Rejection::MissingBookmaker));
    }

    #[test]
    fn test_validate_rejects_empty_player() {
        let mut raw = candidate();
        raw.player2 = Some(String::new());

        assert_eq!(
            validate(raw, now()),
            Err(Rejection::MissingPlayer { field: "player2" })
        );
    }

    #[test]
    fn test_validate_rejects_player_that_is_only_a_marker() {
        let mut raw = candidate();
        raw.player1 = Some("(ret)".to_string());

        assert_eq!(
            validate(raw, now()),
            Err(Rejection::MissingPlayer { field: "player1" })
        );
    }

    #[test]
    fn test_validate_rejects_same_player_after_normalization() {
        let mut raw = candidate();
        raw.player2 = Some("  djokovic   n. ".to_string());

        let err = validate(raw, now()).unwrap_err();
        assert_eq!(
            err,
            Rejection::SamePlayers {
                name: "djokovic n.".to_string()
            }
        );
    }

    #[test]
    fn test_validate_cleans_display_names() {
        let mut raw = candidate();
        raw.player1 = Some("Djokovic   N. (ret)".to_string());

        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.player1(), "Djokovic N.");
    }

    #[test]
    fn test_validate_parses_legacy_timestamp() {
        let mut raw = candidate();
        raw.timestamp = Some("2025-01-14 09:00:00".to_string());

        let quote = validate(raw, now()).unwrap();
        assert_eq!(
            quote.timestamp(),
            Utc.with_ymd_and_hms(2025, 1, 14, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_validate_parses_rfc3339_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 9, 0, 0).unwrap();
        let quote = validate(candidate().with_timestamp(at), now()).unwrap();
        assert_eq!(quote.timestamp(), at);
    }

    #[test]
    fn test_validate_falls_back_to_capture_time() {
        let mut raw = candidate();
        raw.timestamp = Some("yesterday".to_string());

        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.timestamp(), now());
    }

    #[test]
    fn test_validate_drops_blank_optional_fields() {
        let raw = candidate().with_schedule("", " 14:00 ").with_source_url("  ");

        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.match_date(), None);
        assert_eq!(quote.match_time(), Some("14:00"));
        assert_eq!(quote.source_url(), None);
    }

    // ==================== Derived Figures Tests ====================

    #[test]
    fn test_quote_margin_is_derived_from_odds() {
        let raw = RawQuote::new("a", "X", "Y", dec!(2.0), dec!(2.0));
        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.margin(), Decimal::ZERO);
    }

    #[test]
    fn test_quote_implied_probabilities() {
        let raw = RawQuote::new("a", "X", "Y", dec!(1.25), dec!(5));
        let quote = validate(raw, now()).unwrap();
        assert_eq!(quote.implied_probabilities(), (dec!(80), dec!(20)));
    }

    // ==================== Batch Tests ====================

    #[test]
    fn test_validate_batch_skips_invalid_rows() {
        let mut bad_odds = candidate();
        bad_odds.odds_player1 = Some(dec!(0.5).into());
        let mut no_bookmaker = candidate();
        no_bookmaker.bookmaker = None;

        let report = validate_batch(vec![candidate(), bad_odds, no_bookmaker, candidate()], now());

        assert_eq!(report.total(), 4);
        assert_eq!(report.quotes.len(), 2);
        assert_eq!(report.rejections.len(), 2);
        assert_eq!(report.rejections[0].index, 1);
        assert_eq!(report.rejections[0].bookmaker.as_deref(), Some("oddsportal"));
        assert_eq!(report.rejections[1].index, 2);
        assert_eq!(report.rejections[1].reason, Rejection::MissingBookmaker);
    }

    #[test]
    fn test_validate_batch_empty() {
        let report = validate_batch(Vec::new(), now());
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_rejection_serializes_with_reason_tag() {
        let json = serde_json::to_value(Rejection::MissingOdds {
            field: "odds_player1",
        })
        .unwrap();
        assert_eq!(json["reason"], "missing_odds");
        assert_eq!(json["field"], "odds_player1");
    }
}
