//! Low-margin quote detection.
//!
//! A quote is a value bet when its bookmaker margin is strictly below the
//! configured threshold, i.e. the bookmaker is pricing the match closer to
//! fair than usual.

use rust_decimal::Decimal;
use tennis_odds_core::Quote;
use tracing::debug;

use crate::types::ValueBet;

/// Quotes with margin strictly below `margin_threshold`, lowest margin first.
///
/// Equal margins keep their input order. When `limit` is set only the first
/// `limit` entries are returned.
#[must_use]
pub fn find_value_bets(
    quotes: &[Quote],
    margin_threshold: Decimal,
    limit: Option<usize>,
) -> Vec<ValueBet> {
    let mut bets: Vec<ValueBet> = quotes
        .iter()
        .filter_map(|quote| {
            let margin = quote.margin();
            (margin < margin_threshold).then(|| ValueBet {
                quote: quote.clone(),
                margin,
            })
        })
        .collect();

    // Stable sort keeps input order for equal margins.
    bets.sort_by(|a, b| a.margin.cmp(&b.margin));

    if let Some(limit) = limit {
        bets.truncate(limit);
    }

    debug!(
        quotes = quotes.len(),
        value_bets = bets.len(),
        threshold = %margin_threshold,
        "Value bet scan complete"
    );

    bets
}
