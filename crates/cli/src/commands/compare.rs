//! Bookmaker comparison by average margin.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tennis_odds_analysis::{
    best_odds_per_match, rank_bookmakers, BestOdds, MarketAnalyzer, RankedBookmaker,
};
use tracing::info;

use super::session::{acquire_quotes, print_json, GlobalArgs};

/// Arguments for the compare command.
#[derive(Args, Debug, Clone, Default)]
pub struct CompareArgs {
    /// Also print the best available price per match
    #[arg(long)]
    pub best_odds: bool,
}

#[derive(Debug, Serialize)]
struct CompareOutput {
    ranking: Vec<RankedBookmaker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_odds: Option<Vec<BestOdds>>,
}

pub async fn run_compare(global: &GlobalArgs, args: CompareArgs) -> Result<()> {
    let config = global.load_config()?;
    let outcome = acquire_quotes(&config).await?;

    let analyzer = MarketAnalyzer::new(config.analysis);
    let ranking = rank_bookmakers(&analyzer.compare(&outcome.quotes));
    let best_odds = args
        .best_odds
        .then(|| best_odds_per_match(&analyzer.reconcile(&outcome.quotes)));

    info!(bookmakers = ranking.len(), "Comparison complete");

    print_json(&CompareOutput { ranking, best_odds }, global.pretty)
}
