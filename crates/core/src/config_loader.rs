use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Default location of the main configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix for environment overrides, e.g. `ODDS_ANALYSIS__MIN_PROFIT=1.0`.
pub const ENV_PREFIX: &str = "ODDS_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, TOML, environment variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads application configuration rooted at a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path.as_ref(), None).extract()?;
        Ok(config)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// `config/Config.toml` is overlaid with `config/Config.{profile}.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(path: impl AsRef<Path>, profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path.as_ref(), Some(profile)).extract()?;
        Ok(config)
    }

    fn figment(path: &Path, profile: Option<&str>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path));

        if let Some(profile) = profile {
            figment = figment.merge(Toml::file(path.with_extension(format!("{profile}.toml"))));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(path.with_extension("json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("config/Config.toml").expect("defaults");
            assert_eq!(config.analysis.min_profit, dec!(0.5));
            assert!(config.sources.demo.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_overrides() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [analysis]
                margin_threshold = 2.5
                value_bet_limit = 5

                [acquisition]
                max_retries = 5
                rate_limit_seconds = 0.0

                [sources.demo]
                bookmakers = ["pinnacle", "betfair"]
                seed = 7
                "#,
            )?;

            let config = ConfigLoader::load().expect("valid config");
            assert_eq!(config.analysis.margin_threshold, dec!(2.5));
            assert_eq!(config.analysis.value_bet_limit, Some(5));
            assert_eq!(config.acquisition.max_retries, 5);
            assert_eq!(config.sources.demo.bookmakers, vec!["pinnacle", "betfair"]);
            assert_eq!(config.sources.demo.seed, Some(7));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [acquisition]
                max_retries = 5
                "#,
            )?;
            jail.set_env("ODDS_ACQUISITION__MAX_RETRIES", "1");
            jail.set_env("ODDS_SOURCES__THE_ODDS_API__ENABLED", "true");

            let config = ConfigLoader::load().expect("valid config");
            assert_eq!(config.acquisition.max_retries, 1);
            assert!(config.sources.the_odds_api.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_profile_overlay() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/Config.toml", "[analysis]\nmin_profit = 0.5\n")?;
            jail.create_file("config/Config.live.toml", "[analysis]\nmin_profit = 1.25\n")?;

            let config = ConfigLoader::load_with_profile(DEFAULT_CONFIG_PATH, "live")
                .expect("valid config");
            assert_eq!(config.analysis.min_profit, dec!(1.25));
            Ok(())
        });
    }
}
