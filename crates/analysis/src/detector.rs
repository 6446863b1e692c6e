//! Cross-bookmaker arbitrage detection.
//!
//! Within one match, backing the first player at bookmaker A and the second
//! player at bookmaker B locks in a profit whenever the inverse prices sum
//! to less than one:
//!
//! ```text
//! A: Djokovic @ 2.10    B: Alcaraz @ 2.10
//!
//! inverse_sum = 1/2.10 + 1/2.10 = 0.952
//! profit      = (1/0.952 - 1) * 100 = 5.00%
//! stakes      = 50.00% / 50.00%
//! ```
//!
//! Both leg assignments are checked for every unordered pair of bookmakers
//! and only the more profitable one is reported.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tennis_odds_core::{inverse_sum, AnalysisConfig, Quote};
use tracing::{debug, info, trace};

use crate::types::{ArbitrageCalculation, ArbitrageLeg, ArbitrageOpportunity, MatchGroup, MatchKey};

// =============================================================================
// Detection Configuration
// =============================================================================

/// Configuration for arbitrage detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum guaranteed profit, as a percentage, for a reported opportunity.
    pub min_profit: Decimal,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_profit: dec!(0.5),
        }
    }
}

impl DetectorConfig {
    /// Only clear arbitrages that survive small price moves.
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            min_profit: dec!(1.5),
        }
    }

    /// Reports every arbitrage, however thin.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            min_profit: Decimal::ZERO,
        }
    }

    /// Sets the minimum profit.
    #[must_use]
    pub fn with_min_profit(mut self, min_profit: Decimal) -> Self {
        self.min_profit = min_profit;
        self
    }
}

impl From<&AnalysisConfig> for DetectorConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            min_profit: config.min_profit,
        }
    }
}

// =============================================================================
// Pure Calculation
// =============================================================================

/// Profit and stake split for backing each side at the given prices.
///
/// Returns `None` unless the prices form an arbitrage (`1/o1 + 1/o2 < 1`),
/// when either price is not strictly greater than 1.0, or when the figures
/// do not fit in a `Decimal`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tennis_odds_analysis::calculate_arbitrage;
///
/// let calc = calculate_arbitrage(dec!(2.5), dec!(2.5)).unwrap();
/// assert_eq!(calc.profit_pct, dec!(25));
/// assert_eq!(calc.stake1_pct, dec!(50));
/// assert!(calculate_arbitrage(dec!(1.9), dec!(1.9)).is_none());
/// ```
#[must_use]
pub fn calculate_arbitrage(odds1: Decimal, odds2: Decimal) -> Option<ArbitrageCalculation> {
    let sum = inverse_sum(odds1, odds2).ok()?;
    // Prices so large their inverses vanish at Decimal precision carry no
    // usable arbitrage.
    if sum.is_zero() || sum >= Decimal::ONE {
        return None;
    }

    let hundred = Decimal::ONE_HUNDRED;
    let stake1_pct = Decimal::ONE
        .checked_div(odds1)?
        .checked_div(sum)?
        .checked_mul(hundred)?;
    let profit_pct = Decimal::ONE
        .checked_div(sum)?
        .checked_sub(Decimal::ONE)?
        .checked_mul(hundred)?;

    Some(ArbitrageCalculation {
        inverse_sum: sum,
        profit_pct,
        stake1_pct,
        stake2_pct: hundred - stake1_pct,
    })
}

/// Stake shares, as percentages, that equalize the payout of both legs.
///
/// Returns `None` when the prices are not an arbitrage.
#[must_use]
pub fn stake_split(odds1: Decimal, odds2: Decimal) -> Option<(Decimal, Decimal)> {
    calculate_arbitrage(odds1, odds2).map(|calc| (calc.stake1_pct, calc.stake2_pct))
}

// =============================================================================
// Arbitrage Detector
// =============================================================================

/// Finds arbitrage opportunities across the bookmakers quoting each match.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageDetector {
    config: DetectorConfig,
}

impl ArbitrageDetector {
    /// Creates a detector with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector with custom configuration.
    #[must_use]
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Best arbitrage between two quotes on the same match, if any meets the
    /// profit threshold.
    ///
    /// Tries the first player from `a` with the second from `b`, then the
    /// reverse, and keeps the higher profit. Ties favour the first assignment.
    #[must_use]
    pub fn detect_pair(
        &self,
        key: &MatchKey,
        a: &Quote,
        b: &Quote,
    ) -> Option<ArbitrageOpportunity> {
        trace!(
            match_key = %key,
            bookmaker_a = a.bookmaker(),
            bookmaker_b = b.bookmaker(),
            "Checking bookmaker pair for arbitrage"
        );

        let forward = self.check_assignment(key, a, b);
        let reverse = self.check_assignment(key, b, a);

        match (forward, reverse) {
            (Some(f), Some(r)) => {
                if f.profit_pct >= r.profit_pct {
                    Some(f)
                } else {
                    Some(r)
                }
            }
            (Some(o), None) | (None, Some(o)) => Some(o),
            (None, None) => None,
        }
    }

    /// Backs the key's first player at `first` and the second at `second`.
    fn check_assignment(
        &self,
        key: &MatchKey,
        first: &Quote,
        second: &Quote,
    ) -> Option<ArbitrageOpportunity> {
        let (odds_first, _) = key.aligned_odds(first);
        let (_, odds_second) = key.aligned_odds(second);

        let calc = calculate_arbitrage(odds_first, odds_second)?;

        if calc.profit_pct < self.config.min_profit {
            trace!(
                match_key = %key,
                profit_pct = %calc.profit_pct,
                min_profit = %self.config.min_profit,
                "Arbitrage below profit threshold"
            );
            return None;
        }

        let (player_first, _) = key.aligned_players(first);
        let (_, player_second) = key.aligned_players(second);
        let tournament = [first.tournament(), second.tournament()]
            .into_iter()
            .find(|t| !t.is_empty())
            .unwrap_or_default()
            .to_string();

        Some(ArbitrageOpportunity {
            match_key: key.clone(),
            tournament,
            first_leg: ArbitrageLeg {
                bookmaker: first.bookmaker().to_string(),
                player: player_first.to_string(),
                odds: odds_first,
            },
            second_leg: ArbitrageLeg {
                bookmaker: second.bookmaker().to_string(),
                player: player_second.to_string(),
                odds: odds_second,
            },
            first_quote: first.clone(),
            second_quote: second.clone(),
            inverse_sum: calc.inverse_sum,
            profit_pct: calc.profit_pct,
            stake1_pct: calc.stake1_pct,
            stake2_pct: calc.stake2_pct,
        })
    }

    /// All opportunities within one match, one per qualifying bookmaker pair.
    #[must_use]
    pub fn detect_group(&self, group: &MatchGroup) -> Vec<ArbitrageOpportunity> {
        let quotes = group.quotes();
        let mut found = Vec::new();

        for (i, a) in quotes.iter().enumerate() {
            for b in &quotes[i + 1..] {
                if let Some(opp) = self.detect_pair(group.key(), a, b) {
                    info!(
                        match_key = %opp.match_key,
                        first_bookmaker = %opp.first_leg.bookmaker,
                        first_odds = %opp.first_leg.odds,
                        second_bookmaker = %opp.second_leg.bookmaker,
                        second_odds = %opp.second_leg.odds,
                        profit_pct = %opp.profit_pct.round_dp(2),
                        "Arbitrage opportunity detected"
                    );
                    found.push(opp);
                }
            }
        }

        found
    }

    /// All opportunities across every match, most profitable first.
    ///
    /// Single-bookmaker matches are skipped.
    #[must_use]
    pub fn find_opportunities(
        &self,
        groups: &BTreeMap<MatchKey, MatchGroup>,
    ) -> Vec<ArbitrageOpportunity> {
        let mut opportunities: Vec<ArbitrageOpportunity> = groups
            .values()
            .filter(|group| group.is_cross_book())
            .flat_map(|group| self.detect_group(group))
            .collect();

        opportunities.sort_by(|a, b| {
            b.profit_pct
                .cmp(&a.profit_pct)
                .then_with(|| a.match_key.cmp(&b.match_key))
                .then_with(|| a.bookmaker_pair().cmp(&b.bookmaker_pair()))
        });

        debug!(
            matches = groups.len(),
            opportunities = opportunities.len(),
            "Arbitrage scan complete"
        );

        opportunities
    }

    /// Summarizes a scan for monitoring.
    #[must_use]
    pub fn summarize(
        &self,
        groups: &BTreeMap<MatchKey, MatchGroup>,
        opportunities: &[ArbitrageOpportunity],
    ) -> DetectionSummary {
        DetectionSummary {
            matches_scanned: groups.len(),
            cross_book_matches: groups.values().filter(|g| g.is_cross_book()).count(),
            opportunities: opportunities.len(),
            best_profit_pct: opportunities.iter().map(|o| o.profit_pct).max(),
        }
    }
}

/// Every arbitrage across the grouped matches at or above `min_profit`,
/// sorted by profit descending.
#[must_use]
pub fn find_arbitrage_opportunities(
    groups: &BTreeMap<MatchKey, MatchGroup>,
    min_profit: Decimal,
) -> Vec<ArbitrageOpportunity> {
    ArbitrageDetector::with_config(DetectorConfig::default().with_min_profit(min_profit))
        .find_opportunities(groups)
}

// =============================================================================
// Detection Result Summary
// =============================================================================

/// Summary of an arbitrage scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    /// Matches considered.
    pub matches_scanned: usize,
    /// Matches quoted by two or more bookmakers.
    pub cross_book_matches: usize,
    /// Opportunities meeting the profit threshold.
    pub opportunities: usize,
    /// Highest profit found, as a percentage.
    pub best_profit_pct: Option<Decimal>,
}
