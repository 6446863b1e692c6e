//! Canonical records and pure odds math for the tennis odds engine.
//!
//! - [`quote`]: raw candidates, the validated [`Quote`] and rejection reasons
//! - [`odds`]: implied probability and bookmaker margin
//! - [`names`]: player name cleaning and identity normalization
//! - [`config`] / [`config_loader`]: application configuration

pub mod config;
pub mod config_loader;
pub mod names;
pub mod odds;
pub mod quote;

pub use config::{
    AcquisitionConfig, AnalysisConfig, AppConfig, DemoSourceConfig, SourcesConfig,
    TheOddsApiConfig,
};
pub use config_loader::ConfigLoader;
pub use names::{clean_player_name, normalize_player_name};
pub use odds::{bookmaker_margin, implied_probability, inverse_sum, OddsError};
pub use quote::{
    validate, validate_batch, RawOdds, RawQuote, RejectedQuote, Rejection, Quote,
    ValidationReport,
};
