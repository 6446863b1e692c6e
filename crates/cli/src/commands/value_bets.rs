//! Low-margin quotes, best first.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use tennis_odds_analysis::MarketAnalyzer;
use tennis_odds_core::AnalysisConfig;
use tracing::info;

use super::session::{acquire_quotes, print_json, GlobalArgs};

/// Arguments for the value-bets command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValueBetsArgs {
    /// Margin percentage below which a quote qualifies
    #[arg(long)]
    pub margin_threshold: Option<Decimal>,

    /// Maximum number of value bets to print
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ValueBetsArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(threshold) = self.margin_threshold {
            config.margin_threshold = threshold;
        }
        if self.limit.is_some() {
            config.value_bet_limit = self.limit;
        }
    }
}

pub async fn run_value_bets(global: &GlobalArgs, args: ValueBetsArgs) -> Result<()> {
    let mut config = global.load_config()?;
    args.apply(&mut config.analysis);

    let outcome = acquire_quotes(&config).await?;
    let value_bets = MarketAnalyzer::new(config.analysis).value_bets(&outcome.quotes);

    info!(
        quotes = outcome.quotes.len(),
        value_bets = value_bets.len(),
        "Value bet scan complete"
    );

    print_json(&value_bets, global.pretty)
}
