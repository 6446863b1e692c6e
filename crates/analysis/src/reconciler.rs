//! Groups validated quotes from different bookmakers by match.
//!
//! Two quotes belong to the same match when their normalized player names
//! form the same unordered pair. Matching is exact on the normalized form;
//! no fuzzy matching is attempted, so `N. Djokovic` and `Djokovic N.` are
//! different players.
//!
//! Within a match each bookmaker keeps a single quote: the one with the
//! latest timestamp, with later input winning ties.

use std::collections::BTreeMap;

use tennis_odds_core::Quote;
use tracing::{debug, info};

use crate::types::{MatchGroup, MatchKey};

/// Groups quotes by match, keyed and iterated in [`MatchKey`] order.
///
/// Every input quote either lands in exactly one group or is dropped as a
/// superseded duplicate of the same bookmaker on the same match.
#[must_use]
pub fn reconcile(quotes: &[Quote]) -> BTreeMap<MatchKey, MatchGroup> {
    let mut buckets: BTreeMap<MatchKey, Vec<Quote>> = BTreeMap::new();
    let mut superseded = 0usize;

    for quote in quotes {
        let key = MatchKey::from_quote(quote);
        let bucket = buckets.entry(key).or_default();

        match bucket
            .iter_mut()
            .find(|existing| existing.bookmaker() == quote.bookmaker())
        {
            Some(existing) => {
                superseded += 1;
                if quote.timestamp() >= existing.timestamp() {
                    debug!(
                        bookmaker = quote.bookmaker(),
                        kept = %quote.timestamp(),
                        dropped = %existing.timestamp(),
                        "Replacing older duplicate quote"
                    );
                    *existing = quote.clone();
                } else {
                    debug!(
                        bookmaker = quote.bookmaker(),
                        kept = %existing.timestamp(),
                        dropped = %quote.timestamp(),
                        "Ignoring stale duplicate quote"
                    );
                }
            }
            None => bucket.push(quote.clone()),
        }
    }

    let groups: BTreeMap<MatchKey, MatchGroup> = buckets
        .into_iter()
        .map(|(key, mut members)| {
            members.sort_by(|a, b| a.bookmaker().cmp(b.bookmaker()));
            (key.clone(), MatchGroup::new(key, members))
        })
        .collect();

    info!(
        quotes = quotes.len(),
        matches = groups.len(),
        cross_book = groups.values().filter(|g| g.is_cross_book()).count(),
        superseded,
        "Reconciled quotes into matches"
    );

    groups
}
