use clap::{Parser, Subcommand};
use tennis_odds_core::config_loader::DEFAULT_CONFIG_PATH;

mod commands;

use commands::{ArbitrageArgs, CompareArgs, GlobalArgs, ScanArgs, ValueBetsArgs};

#[derive(Parser)]
#[command(name = "tennis-odds")]
#[command(about = "Tennis odds normalization and market analysis", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Config profile overlaid on the base file (e.g. "live")
    #[arg(long, global = true, env = "ODDS_PROFILE")]
    profile: Option<String>,

    /// Seed for the demo source, for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch odds once and print the full market report
    Scan(ScanArgs),
    /// List cross-bookmaker arbitrage opportunities
    Arbitrage(ArbitrageArgs),
    /// List quotes priced below the margin threshold
    ValueBets(ValueBetsArgs),
    /// Rank bookmakers by average margin
    Compare(CompareArgs),
}

impl Cli {
    fn global_args(&self) -> GlobalArgs {
        GlobalArgs {
            config: self.config.clone(),
            profile: self.profile.clone(),
            seed: self.seed,
            pretty: self.pretty,
        }
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Stdout carries the JSON result; logs go to stderr.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let global = cli.global_args();
    match cli.command {
        Commands::Scan(args) => commands::run_scan(&global, args).await?,
        Commands::Arbitrage(args) => commands::run_arbitrage(&global, args).await?,
        Commands::ValueBets(args) => commands::run_value_bets(&global, args).await?,
        Commands::Compare(args) => commands::run_compare(&global, args).await?,
    }

    Ok(())
}
