//! Cross-bookmaker arbitrage listing.
//!
//! ```bash
//! tennis-odds arbitrage --min-profit 0.5 --total-stake 100
//! ```

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tennis_odds_analysis::{ArbitrageOpportunity, MarketAnalyzer};
use tennis_odds_core::AnalysisConfig;
use tracing::info;

use super::session::{acquire_quotes, print_json, GlobalArgs};

/// Arguments for the arbitrage command.
#[derive(Args, Debug, Clone, Default)]
pub struct ArbitrageArgs {
    /// Minimum guaranteed profit percentage
    #[arg(long)]
    pub min_profit: Option<Decimal>,

    /// Total amount to split across both legs
    ///
    /// When set, each opportunity carries the stake per leg and the payout.
    #[arg(long)]
    pub total_stake: Option<Decimal>,
}

impl ArbitrageArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(min_profit) = self.min_profit {
            config.min_profit = min_profit;
        }
    }
}

/// Stakes and payouts for a concrete bankroll.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct StakePlan {
    total_stake: Decimal,
    first_stake: Decimal,
    second_stake: Decimal,
    /// Payout if the first or the second leg wins.
    payouts: (Decimal, Decimal),
}

impl StakePlan {
    fn new(opportunity: &ArbitrageOpportunity, total_stake: Decimal) -> Self {
        let (first_stake, second_stake) = opportunity.stakes(total_stake);
        let (first, second) = opportunity.payouts(total_stake);
        Self {
            total_stake,
            first_stake: first_stake.round_dp(2),
            second_stake: second_stake.round_dp(2),
            payouts: (first.round_dp(2), second.round_dp(2)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ArbitrageEntry {
    #[serde(flatten)]
    opportunity: ArbitrageOpportunity,
    #[serde(skip_serializing_if = "Option::is_none")]
    stake_plan: Option<StakePlan>,
}

fn entries(
    opportunities: Vec<ArbitrageOpportunity>,
    total_stake: Option<Decimal>,
) -> Vec<ArbitrageEntry> {
    opportunities
        .into_iter()
        .map(|opportunity| ArbitrageEntry {
            stake_plan: total_stake.map(|total| StakePlan::new(&opportunity, total)),
            opportunity,
        })
        .collect()
}

pub async fn run_arbitrage(global: &GlobalArgs, args: ArbitrageArgs) -> Result<()> {
    let mut config = global.load_config()?;
    args.apply(&mut config.analysis);

    let outcome = acquire_quotes(&config).await?;
    let opportunities = MarketAnalyzer::new(config.analysis).arbitrage(&outcome.quotes);

    info!(
        quotes = outcome.quotes.len(),
        opportunities = opportunities.len(),
        "Arbitrage scan complete"
    );

    print_json(&entries(opportunities, args.total_stake), global.pretty)
}
