//! Synthetic odds for demos and offline runs.
//!
//! Every fetch prices a fixed pool of match-ups at each configured
//! bookmaker. Each match draws a "true" win probability (roughly 70% close
//! contests, 30% favourite vs underdog); each bookmaker then applies its own
//! margin and a little noise, so books disagree the way real ones do and an
//! occasional cross-book arbitrage appears.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tennis_odds_core::{DemoSourceConfig, RawQuote};
use tracing::debug;

use crate::error::Result;
use crate::source::OddsSource;

/// Match-ups priced on every fetch.
pub const PLAYER_PAIRS: &[(&str, &str)] = &[
    ("Djokovic N.", "Alcaraz C."),
    ("Sinner J.", "Medvedev D."),
    ("Rune H.", "Tsitsipas S."),
    ("Fritz T.", "Paul T."),
    ("Zverev A.", "Rublev A."),
    ("Ruud C.", "Hurkacz H."),
    ("De Minaur A.", "Dimitrov G."),
    ("Shelton B.", "Tiafoe F."),
    ("Auger-Aliassime F.", "Shapovalov D."),
    ("Norrie C.", "Draper J."),
    ("Sabalenka A.", "Swiatek I."),
    ("Gauff C.", "Rybakina E."),
];

/// Tournaments a match may be assigned to.
pub const TOURNAMENTS: &[&str] = &[
    "ATP Australian Open",
    "ATP Dubai",
    "ATP Indian Wells",
    "ATP Miami Open",
    "ATP Madrid",
    "ATP Rome",
    "WTA Dubai",
    "WTA Indian Wells",
    "WTA Miami Open",
    "WTA Madrid",
];

const BALANCED_SHARE: f64 = 0.7;
const MIN_ODDS: f64 = 1.01;

/// Generates realistic-looking odds without touching the network.
#[derive(Debug)]
pub struct DemoSource {
    bookmakers: Vec<String>,
    seed: Option<u64>,
    fetches: AtomicU64,
}

impl DemoSource {
    /// Creates a source pricing every pair at each bookmaker.
    ///
    /// With a seed, the n-th fetch of two sources built alike is identical.
    #[must_use]
    pub fn new(bookmakers: Vec<String>, seed: Option<u64>) -> Self {
        Self {
            bookmakers,
            seed,
            fetches: AtomicU64::new(0),
        }
    }

    /// Creates a source from configuration.
    #[must_use]
    pub fn from_config(config: &DemoSourceConfig) -> Self {
        Self::new(config.bookmakers.clone(), config.seed)
    }

    /// Bookmakers being simulated.
    #[must_use]
    pub fn bookmakers(&self) -> &[String] {
        &self.bookmakers
    }

    fn rng(&self) -> StdRng {
        let fetch = self.fetches.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(fetch)),
            None => StdRng::from_entropy(),
        }
    }

    /// One batch of candidates: every pair at every bookmaker.
    #[must_use]
    pub fn generate(&self) -> Vec<RawQuote> {
        let mut rng = self.rng();
        let now = Utc::now();
        let mut quotes = Vec::with_capacity(PLAYER_PAIRS.len() * self.bookmakers.len());

        for (index, (player1, player2)) in PLAYER_PAIRS.iter().enumerate() {
            let p1 = true_probability(&mut rng);
            let tournament = TOURNAMENTS.choose(&mut rng).copied().unwrap_or("ATP Tour");
            let match_date = (now + Duration::days(rng.gen_range(0..=7)))
                .format("%Y-%m-%d")
                .to_string();
            let match_time = format!(
                "{:02}:{}",
                rng.gen_range(10..=20),
                if rng.gen_bool(0.5) { "00" } else { "30" }
            );

            for bookmaker in &self.bookmakers {
                let margin = rng.gen_range(0.02..0.07);
                let implied1 = (p1 + rng.gen_range(-0.03..0.03)) * (1.0 + margin);
                let implied2 = (1.0 - p1 + rng.gen_range(-0.03..0.03)) * (1.0 + margin);

                quotes.push(
                    RawQuote::new(
                        bookmaker.as_str(),
                        *player1,
                        *player2,
                        price(implied1),
                        price(implied2),
                    )
                    .with_timestamp(now)
                    .with_tournament(tournament)
                    .with_schedule(match_date.clone(), match_time.clone())
                    .with_source_url(format!(
                        "https://demo.tennis-odds.local/{bookmaker}/match/{index}"
                    )),
                );
            }
        }

        debug!(
            matches = PLAYER_PAIRS.len(),
            bookmakers = self.bookmakers.len(),
            candidates = quotes.len(),
            "Generated demo odds"
        );

        quotes
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::from_config(&DemoSourceConfig::default())
    }
}

#[async_trait]
impl OddsSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn endpoint(&self) -> String {
        "demo://tennis".to_string()
    }

    async fn fetch(&self) -> Result<Vec<RawQuote>> {
        Ok(self.generate())
    }
}

/// Win probability of the first player.
fn true_probability(rng: &mut StdRng) -> f64 {
    if rng.gen_bool(BALANCED_SHARE) {
        rng.gen_range(0.42..0.58)
    } else {
        let favourite = rng.gen_range(0.60..0.78);
        if rng.gen_bool(0.5) {
            favourite
        } else {
            1.0 - favourite
        }
    }
}

/// Decimal odds, two places, for an implied probability.
fn price(implied: f64) -> Decimal {
    let odds = (1.0 / implied).max(MIN_ODDS);
    Decimal::try_from(odds).unwrap_or(Decimal::TWO).round_dp(2)
}
