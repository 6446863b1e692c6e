//! End-to-end market analysis over one batch of validated quotes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tennis_odds_core::{AnalysisConfig, Quote};
use tracing::info;

use crate::comparison::{best_odds_per_match, compare_bookmakers, rank_bookmakers, RankedBookmaker};
use crate::detector::{ArbitrageDetector, DetectionSummary, DetectorConfig};
use crate::reconciler::reconcile;
use crate::types::{ArbitrageOpportunity, BestOdds, BookmakerStats, MatchGroup, MatchKey, ValueBet};
use crate::value::find_value_bets;

/// Tournament label used when no quote names one.
pub const UNKNOWN_TOURNAMENT: &str = "Unknown";

// =============================================================================
// Market Report
// =============================================================================

/// Everything the analyzer derives from one batch of quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Quotes analyzed.
    pub total_quotes: usize,
    /// Distinct matches after reconciliation.
    pub match_count: usize,
    /// Distinct bookmakers, sorted.
    pub bookmakers: Vec<String>,
    /// Distinct tournaments, sorted.
    pub tournaments: Vec<String>,
    /// Arbitrage scan summary.
    pub arbitrage_summary: DetectionSummary,
    /// Arbitrage opportunities, most profitable first, capped at the sample size.
    pub arbitrage: Vec<ArbitrageOpportunity>,
    /// Value bets found, before any cap.
    pub value_bet_count: usize,
    /// Value bets, lowest margin first, capped at the sample size.
    pub value_bets: Vec<ValueBet>,
    /// Bookmakers by mean margin ascending.
    pub bookmaker_ranking: Vec<RankedBookmaker>,
    /// Best prices per match, capped at the sample size.
    pub best_odds: Vec<BestOdds>,
}

// =============================================================================
// Market Analyzer
// =============================================================================

/// Runs reconciliation, value-bet, arbitrage and comparison passes with one
/// set of thresholds.
#[derive(Debug, Clone)]
pub struct MarketAnalyzer {
    config: AnalysisConfig,
    detector: ArbitrageDetector,
}

impl MarketAnalyzer {
    /// Creates an analyzer with the given thresholds.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        let detector = ArbitrageDetector::with_config(DetectorConfig::from(&config));
        Self { config, detector }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Groups quotes by match.
    #[must_use]
    pub fn reconcile(&self, quotes: &[Quote]) -> BTreeMap<MatchKey, MatchGroup> {
        reconcile(quotes)
    }

    /// Value bets under the configured margin threshold and limit.
    #[must_use]
    pub fn value_bets(&self, quotes: &[Quote]) -> Vec<ValueBet> {
        find_value_bets(
            quotes,
            self.config.margin_threshold,
            self.config.value_bet_limit,
        )
    }

    /// Arbitrage opportunities at or above the configured minimum profit.
    #[must_use]
    pub fn arbitrage(&self, quotes: &[Quote]) -> Vec<ArbitrageOpportunity> {
        self.detector.find_opportunities(&reconcile(quotes))
    }

    /// Margin statistics per bookmaker.
    #[must_use]
    pub fn compare(&self, quotes: &[Quote]) -> BTreeMap<String, BookmakerStats> {
        compare_bookmakers(quotes)
    }

    /// Full report over one batch, stamped with the current time.
    #[must_use]
    pub fn report(&self, quotes: &[Quote]) -> MarketReport {
        self.report_at(quotes, Utc::now())
    }

    /// Full report over one batch.
    #[must_use]
    pub fn report_at(&self, quotes: &[Quote], generated_at: DateTime<Utc>) -> MarketReport {
        let sample = self.config.report_sample_size;
        let groups = reconcile(quotes);

        let mut arbitrage = self.detector.find_opportunities(&groups);
        let arbitrage_summary = self.detector.summarize(&groups, &arbitrage);
        arbitrage.truncate(sample);

        let mut value_bets = self.value_bets(quotes);
        let value_bet_count = value_bets.len();
        value_bets.truncate(sample);

        let mut best_odds = best_odds_per_match(&groups);
        best_odds.truncate(sample);

        let bookmakers: BTreeSet<&str> = quotes.iter().map(Quote::bookmaker).collect();
        let tournaments: BTreeSet<&str> = quotes
            .iter()
            .map(|q| match q.tournament() {
                "" => UNKNOWN_TOURNAMENT,
                name => name,
            })
            .collect();

        let report = MarketReport {
            generated_at,
            total_quotes: quotes.len(),
            match_count: groups.len(),
            bookmakers: bookmakers.into_iter().map(str::to_string).collect(),
            tournaments: tournaments.into_iter().map(str::to_string).collect(),
            arbitrage_summary,
            arbitrage,
            value_bet_count,
            value_bets,
            bookmaker_ranking: rank_bookmakers(&compare_bookmakers(quotes)),
            best_odds,
        };

        info!(
            quotes = report.total_quotes,
            matches = report.match_count,
            bookmakers = report.bookmakers.len(),
            arbitrage = report.arbitrage_summary.opportunities,
            value_bets = report.value_bet_count,
            "Market report generated"
        );

        report
    }
}

impl Default for MarketAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
