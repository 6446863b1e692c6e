use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub acquisition: AcquisitionConfig,
    pub sources: SourcesConfig,
}

/// Thresholds for the market analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Quotes with a margin below this percentage are value bets.
    pub margin_threshold: Decimal,
    /// Minimum guaranteed profit percentage for a reported arbitrage.
    pub min_profit: Decimal,
    /// Cap on the number of value bets returned, if any.
    pub value_bet_limit: Option<usize>,
    /// Entries kept in each report sample.
    pub report_sample_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            margin_threshold: dec!(3.0),
            min_profit: dec!(0.5),
            value_bet_limit: None,
            report_sample_size: 10,
        }
    }
}

/// Retry and rate-limit policy for network sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub max_retries: u32,
    /// First backoff wait; doubles on each retry.
    pub base_delay_seconds: f64,
    /// Upper bound on a single backoff wait.
    pub max_delay_seconds: f64,
    /// Minimum spacing between calls to the same endpoint. Zero disables it.
    pub rate_limit_seconds: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_seconds: 1.0,
            max_delay_seconds: 30.0,
            rate_limit_seconds: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub demo: DemoSourceConfig,
    pub the_odds_api: TheOddsApiConfig,
}

/// Synthetic odds generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSourceConfig {
    pub enabled: bool,
    pub bookmakers: Vec<String>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for DemoSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bookmakers: vec![
                "oddsportal".to_string(),
                "pinnacle".to_string(),
                "bet365".to_string(),
                "unibet".to_string(),
            ],
            seed: None,
        }
    }
}

/// The Odds API (v4) adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TheOddsApiConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Sport keys, e.g. `tennis_atp`.
    pub sports: Vec<String>,
    /// Bookmaker regions, comma separated.
    pub regions: String,
    pub timeout_secs: u64,
}

impl Default for TheOddsApiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            base_url: "https://api.the-odds-api.com/v4".to_string(),
            sports: vec!["tennis_atp".to_string(), "tennis_wta".to_string()],
            regions: "us,eu".to_string(),
            timeout_secs: 10,
        }
    }
}
