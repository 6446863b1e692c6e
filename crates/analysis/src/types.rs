//! Shared types for match reconciliation and market analysis.
//!
//! This module defines the match identity used to line up quotes from
//! different bookmakers and the derived records produced by the analyzer.

use rust_decimal::Decimal;
use serde::Serialize;
use tennis_odds_core::{normalize_player_name, Quote};

// =============================================================================
// Match Identity
// =============================================================================

/// Order-insensitive identity of a match.
///
/// Holds both normalized player names sorted ascending, so
/// `Djokovic N. vs Alcaraz C.` and `Alcaraz C. vs Djokovic N.` share a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchKey {
    first: String,
    second: String,
}

impl MatchKey {
    /// Builds a key from two player names in any order and any spelling case.
    #[must_use]
    pub fn new(player_a: &str, player_b: &str) -> Self {
        let a = normalize_player_name(player_a);
        let b = normalize_player_name(player_b);
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Key of the match a quote refers to.
    #[must_use]
    pub fn from_quote(quote: &Quote) -> Self {
        Self::new(quote.player1(), quote.player2())
    }

    /// First normalized player in key order.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Second normalized player in key order.
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Returns true when the quote's player1 is this key's first player.
    fn is_in_key_order(&self, quote: &Quote) -> bool {
        normalize_player_name(quote.player1()) == self.first
    }

    /// The quote's prices re-ordered to (first, second) key order.
    #[must_use]
    pub fn aligned_odds(&self, quote: &Quote) -> (Decimal, Decimal) {
        if self.is_in_key_order(quote) {
            (quote.odds_player1(), quote.odds_player2())
        } else {
            (quote.odds_player2(), quote.odds_player1())
        }
    }

    /// The quote's display names re-ordered to (first, second) key order.
    #[must_use]
    pub fn aligned_players<'a>(&self, quote: &'a Quote) -> (&'a str, &'a str) {
        if self.is_in_key_order(quote) {
            (quote.player1(), quote.player2())
        } else {
            (quote.player2(), quote.player1())
        }
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

// =============================================================================
// Match Group
// =============================================================================

/// Quotes from distinct bookmakers on the same match.
///
/// Produced by the reconciler; never empty, one quote per bookmaker, sorted
/// by bookmaker ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchGroup {
    key: MatchKey,
    quotes: Vec<Quote>,
}

impl MatchGroup {
    pub(crate) fn new(key: MatchKey, quotes: Vec<Quote>) -> Self {
        debug_assert!(!quotes.is_empty(), "match groups are never empty");
        Self { key, quotes }
    }

    /// Identity of the match.
    #[must_use]
    pub fn key(&self) -> &MatchKey {
        &self.key
    }

    /// Member quotes, sorted by bookmaker.
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Number of bookmakers quoting the match.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Always false for reconciler output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// True when at least two bookmakers quote the match.
    #[must_use]
    pub fn is_cross_book(&self) -> bool {
        self.quotes.len() >= 2
    }

    /// First non-empty tournament name among the members.
    #[must_use]
    pub fn tournament(&self) -> Option<&str> {
        self.quotes
            .iter()
            .map(Quote::tournament)
            .find(|t| !t.is_empty())
    }
}

// =============================================================================
// Arbitrage
// =============================================================================

/// Inverse sum, profit and stake split for one pair of prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArbitrageCalculation {
    /// `1/o1 + 1/o2`, below 1.0 for an arbitrage.
    pub inverse_sum: Decimal,
    /// Guaranteed return on total stake, as a percentage.
    pub profit_pct: Decimal,
    /// Share of the total stake on the first price, as a percentage.
    pub stake1_pct: Decimal,
    /// Share of the total stake on the second price, as a percentage.
    pub stake2_pct: Decimal,
}

/// One side of an arbitrage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArbitrageLeg {
    /// Bookmaker to back with.
    pub bookmaker: String,
    /// Player to back (display form).
    pub player: String,
    /// Decimal price taken.
    pub odds: Decimal,
}

/// A guaranteed-profit combination of two bookmakers on one match.
///
/// The first leg backs the key's first player, the second leg the key's
/// second player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageOpportunity {
    /// Match the opportunity is on.
    pub match_key: MatchKey,
    /// Tournament, empty when unknown.
    pub tournament: String,
    /// Leg on the key's first player.
    pub first_leg: ArbitrageLeg,
    /// Leg on the key's second player.
    pub second_leg: ArbitrageLeg,
    /// Quote supplying the first leg.
    pub first_quote: Quote,
    /// Quote supplying the second leg.
    pub second_quote: Quote,
    /// `1/first_leg.odds + 1/second_leg.odds`.
    pub inverse_sum: Decimal,
    /// Guaranteed profit on total stake, as a percentage.
    pub profit_pct: Decimal,
    /// Stake share on the first leg, as a percentage.
    pub stake1_pct: Decimal,
    /// Stake share on the second leg, as a percentage.
    pub stake2_pct: Decimal,
}

impl ArbitrageOpportunity {
    /// Amount to place on each leg for a given total stake.
    #[must_use]
    pub fn stakes(&self, total_stake: Decimal) -> (Decimal, Decimal) {
        let hundred = Decimal::ONE_HUNDRED;
        (
            total_stake * self.stake1_pct / hundred,
            total_stake * self.stake2_pct / hundred,
        )
    }

    /// Payout if the first or the second leg wins, for a given total stake.
    ///
    /// Both figures are equal up to rounding.
    #[must_use]
    pub fn payouts(&self, total_stake: Decimal) -> (Decimal, Decimal) {
        let (stake1, stake2) = self.stakes(total_stake);
        (stake1 * self.first_leg.odds, stake2 * self.second_leg.odds)
    }

    /// Unordered pair of bookmakers involved.
    #[must_use]
    pub fn bookmaker_pair(&self) -> (&str, &str) {
        let a = self.first_leg.bookmaker.as_str();
        let b = self.second_leg.bookmaker.as_str();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

// =============================================================================
// Value Bets & Bookmaker Statistics
// =============================================================================

/// A single quote whose margin is under the value threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueBet {
    /// The quote.
    pub quote: Quote,
    /// Its bookmaker margin, as a percentage.
    pub margin: Decimal,
}

/// Margin statistics for one bookmaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookmakerStats {
    /// Quotes seen from the bookmaker.
    pub quote_count: usize,
    /// Mean margin, as a percentage.
    pub mean_margin: Decimal,
    /// Lowest margin, as a percentage.
    pub min_margin: Decimal,
    /// Highest margin, as a percentage.
    pub max_margin: Decimal,
}

/// Best price on each player of one match across all bookmakers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestOdds {
    /// Match identity.
    pub match_key: MatchKey,
    /// Tournament, empty when unknown.
    pub tournament: String,
    /// Best price on the key's first player.
    pub first: ArbitrageLeg,
    /// Best price on the key's second player.
    pub second: ArbitrageLeg,
    /// Margin of the best-line book formed by both prices.
    pub combined_margin: Decimal,
    /// Bookmakers quoting the match.
    pub bookmaker_count: usize,
}
