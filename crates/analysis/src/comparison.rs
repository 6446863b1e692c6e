//! Per-bookmaker margin statistics and best available prices per match.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tennis_odds_core::Quote;

use crate::types::{ArbitrageLeg, BestOdds, BookmakerStats, MatchGroup, MatchKey};

// =============================================================================
// Bookmaker Comparison
// =============================================================================

/// Margin statistics for every bookmaker present in `quotes`.
#[must_use]
pub fn compare_bookmakers(quotes: &[Quote]) -> BTreeMap<String, BookmakerStats> {
    let mut margins: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
    for quote in quotes {
        margins
            .entry(quote.bookmaker())
            .or_default()
            .push(quote.margin());
    }

    margins
        .into_iter()
        .filter_map(|(bookmaker, values)| {
            let min_margin = values.iter().copied().min()?;
            let max_margin = values.iter().copied().max()?;
            let total: Decimal = values.iter().copied().sum();
            let stats = BookmakerStats {
                quote_count: values.len(),
                mean_margin: total / Decimal::from(values.len()),
                min_margin,
                max_margin,
            };
            Some((bookmaker.to_string(), stats))
        })
        .collect()
}

/// A bookmaker's statistics in ranked form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBookmaker {
    /// Bookmaker identifier.
    pub bookmaker: String,
    /// Its margin statistics.
    #[serde(flatten)]
    pub stats: BookmakerStats,
}

/// Bookmakers ordered by mean margin ascending, most competitive first.
///
/// Equal means fall back to bookmaker name.
#[must_use]
pub fn rank_bookmakers(stats: &BTreeMap<String, BookmakerStats>) -> Vec<RankedBookmaker> {
    let mut ranked: Vec<RankedBookmaker> = stats
        .iter()
        .map(|(bookmaker, stats)| RankedBookmaker {
            bookmaker: bookmaker.clone(),
            stats: *stats,
        })
        .collect();

    // BTreeMap iteration is already name-ordered; the sort is stable.
    ranked.sort_by(|a, b| a.stats.mean_margin.cmp(&b.stats.mean_margin));
    ranked
}

// =============================================================================
// Best Odds
// =============================================================================

/// Highest price on each player for every match.
///
/// Equal prices go to the first bookmaker in group order.
#[must_use]
pub fn best_odds_per_match(groups: &BTreeMap<MatchKey, MatchGroup>) -> Vec<BestOdds> {
    groups.values().filter_map(best_odds_for_group).collect()
}

/// Best price on each player within one match.
#[must_use]
pub fn best_odds_for_group(group: &MatchGroup) -> Option<BestOdds> {
    let key = group.key();
    let mut first: Option<ArbitrageLeg> = None;
    let mut second: Option<ArbitrageLeg> = None;

    for quote in group.quotes() {
        let (odds_first, odds_second) = key.aligned_odds(quote);
        let (player_first, player_second) = key.aligned_players(quote);

        if first.as_ref().map_or(true, |best| odds_first > best.odds) {
            first = Some(ArbitrageLeg {
                bookmaker: quote.bookmaker().to_string(),
                player: player_first.to_string(),
                odds: odds_first,
            });
        }
        if second.as_ref().map_or(true, |best| odds_second > best.odds) {
            second = Some(ArbitrageLeg {
                bookmaker: quote.bookmaker().to_string(),
                player: player_second.to_string(),
                odds: odds_second,
            });
        }
    }

    let first = first?;
    let second = second?;
    let combined_margin = tennis_odds_core::bookmaker_margin(first.odds, second.odds).ok()?;

    Some(BestOdds {
        match_key: key.clone(),
        tournament: group.tournament().unwrap_or_default().to_string(),
        first,
        second,
        combined_margin,
        bookmaker_count: group.len(),
    })
}
