//! Full market report: one acquisition cycle followed by every analysis pass.
//!
//! ```bash
//! tennis-odds scan --pretty
//! tennis-odds scan --min-profit 1.0 --sample-size 20
//! ```

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tennis_odds_analysis::{MarketAnalyzer, MarketReport};
use tennis_odds_core::AnalysisConfig;
use tennis_odds_sources::{SourceFailure, SourceRejection};
use tracing::info;

use super::session::{acquire_quotes, print_json, GlobalArgs};

/// Arguments for the scan command.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Margin percentage below which a quote is a value bet
    #[arg(long)]
    pub margin_threshold: Option<Decimal>,

    /// Minimum guaranteed profit percentage for an arbitrage
    #[arg(long)]
    pub min_profit: Option<Decimal>,

    /// Entries kept in each report list
    #[arg(long)]
    pub sample_size: Option<usize>,
}

impl ScanArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(threshold) = self.margin_threshold {
            config.margin_threshold = threshold;
        }
        if let Some(min_profit) = self.min_profit {
            config.min_profit = min_profit;
        }
        if let Some(sample_size) = self.sample_size {
            config.report_sample_size = sample_size;
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanOutput {
    #[serde(flatten)]
    report: MarketReport,
    rejections: Vec<SourceRejection>,
    failures: Vec<SourceFailure>,
}

pub async fn run_scan(global: &GlobalArgs, args: ScanArgs) -> Result<()> {
    let mut config = global.load_config()?;
    args.apply(&mut config.analysis);

    let outcome = acquire_quotes(&config).await?;
    let report = MarketAnalyzer::new(config.analysis).report(&outcome.quotes);

    info!(
        quotes = report.total_quotes,
        matches = report.match_count,
        arbitrage = report.arbitrage_summary.opportunities,
        value_bets = report.value_bet_count,
        "Scan complete"
    );

    print_json(
        &ScanOutput {
            report,
            rejections: outcome.rejections,
            failures: outcome.failures,
        },
        global.pretty,
    )
}
