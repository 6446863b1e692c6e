//! Cross-bookmaker analysis of validated tennis odds.
//!
//! # Overview
//!
//! Quotes from different bookmakers are grouped by match, then scanned for
//! low-margin books and for arbitrage between bookmakers:
//!
//! ```text
//! Bookmaker A: Djokovic @ 2.10, Alcaraz @ 1.80
//! Bookmaker B: Djokovic @ 1.90, Alcaraz @ 2.10
//!
//! Back Djokovic @ 2.10 (A) and Alcaraz @ 2.10 (B):
//!   inverse sum:  0.9524
//!   profit:       5.00%
//!   stakes:       50% / 50%
//! ```
//!
//! # Modules
//!
//! - [`types`]: match identity and analysis records
//! - [`reconciler`]: group quotes by match
//! - [`detector`]: arbitrage detection and stake split
//! - [`value`]: low-margin quotes
//! - [`comparison`]: bookmaker margin statistics and best prices
//! - [`report`]: one-shot market report
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rust_decimal_macros::dec;
//! use tennis_odds_analysis::{reconcile, find_arbitrage_opportunities};
//! use tennis_odds_core::{validate_batch, RawQuote};
//!
//! let batch = validate_batch(
//!     vec![
//!         RawQuote::new("A", "Djokovic N.", "Alcaraz C.", dec!(2.10), dec!(1.80)),
//!         RawQuote::new("B", "Djokovic N.", "Alcaraz C.", dec!(1.90), dec!(2.10)),
//!     ],
//!     Utc::now(),
//! );
//!
//! let groups = reconcile(&batch.quotes);
//! let opportunities = find_arbitrage_opportunities(&groups, dec!(0.5));
//! assert_eq!(opportunities.len(), 1);
//! ```

pub mod comparison;
pub mod detector;
pub mod reconciler;
pub mod report;
pub mod types;
pub mod value;

pub use comparison::{
    best_odds_for_group, best_odds_per_match, compare_bookmakers, rank_bookmakers,
    RankedBookmaker,
};
pub use detector::{
    calculate_arbitrage, find_arbitrage_opportunities, stake_split, ArbitrageDetector,
    DetectionSummary, DetectorConfig,
};
pub use reconciler::reconcile;
pub use report::{MarketAnalyzer, MarketReport, UNKNOWN_TOURNAMENT};
pub use types::{
    ArbitrageCalculation, ArbitrageLeg, ArbitrageOpportunity, BestOdds, BookmakerStats,
    MatchGroup, MatchKey, ValueBet,
};
pub use value::find_value_bets;
