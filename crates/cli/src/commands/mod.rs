//! CLI commands for the tennis odds engine.

pub mod arbitrage;
pub mod compare;
pub mod scan;
pub mod session;
pub mod value_bets;

pub use arbitrage::{run_arbitrage, ArbitrageArgs};
pub use compare::{run_compare, CompareArgs};
pub use scan::{run_scan, ScanArgs};
pub use session::GlobalArgs;
pub use value_bets::{run_value_bets, ValueBetsArgs};
