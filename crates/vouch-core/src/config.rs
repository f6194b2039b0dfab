use anyhow::Result;
use chrono::TimeDelta;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_HORIZON_DAYS, OCCURRENCE_CAP};
use crate::error::{CoreError, CoreResult};
use crate::types::ExpansionPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Look-ahead in days for patterns without an explicit end date.
    pub horizon_days: i64,
    /// Maximum occurrences generated per base slot.
    pub occurrence_cap: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("expansion.horizon_days", DEFAULT_HORIZON_DAYS)?
            .set_default("expansion.occurrence_cap", i64::from(OCCURRENCE_CAP))?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks that the loaded figures are usable.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` when the horizon or the
    /// occurrence cap is not positive.
    pub fn validate(&self) -> CoreResult<()> {
        if self.expansion.horizon_days <= 0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "expansion.horizon_days must be positive (got {})",
                self.expansion.horizon_days
            )));
        }
        if self.expansion.occurrence_cap == 0 {
            return Err(CoreError::InvalidConfiguration(
                "expansion.occurrence_cap must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// ## Summary
    /// Lowers the loaded expansion figures into an `ExpansionPolicy`.
    ///
    /// A horizon too large for `TimeDelta` falls back to the default.
    #[must_use]
    pub fn expansion_policy(&self) -> ExpansionPolicy {
        let horizon = TimeDelta::try_days(self.expansion.horizon_days)
            .unwrap_or_else(|| TimeDelta::days(DEFAULT_HORIZON_DAYS));
        ExpansionPolicy::new(horizon, self.expansion.occurrence_cap)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;
    tracing::debug!(
        horizon_days = settings.expansion.horizon_days,
        occurrence_cap = settings.expansion.occurrence_cap,
        level = %settings.logging.level,
        "configuration loaded"
    );
    Ok(settings)
}
