//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::ReferencePolicy;

/// Largest number of decimal places a converted amount may be shown with.
pub const MAX_DECIMAL_PLACES: u32 = 18;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Converter session configuration.
    #[serde(default)]
    pub converter: ConverterConfig,
    /// Market snapshot configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Converter session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    /// Currencies shown when a session starts, in display order.
    #[serde(default = "default_currencies")]
    pub default_currencies: Vec<String>,
    /// Amount text every initial slot starts from.
    #[serde(default = "default_amount")]
    pub default_amount: String,
    /// Decimal places of converted amounts.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Which slot anchors the base value.
    #[serde(default)]
    pub reference_policy: ReferencePolicy,
    /// Optional hard cap on the number of slots.
    #[serde(default)]
    pub max_slots: Option<usize>,
}

fn default_currencies() -> Vec<String> {
    vec!["BTC".to_string(), "ETH".to_string()]
}

fn default_amount() -> String {
    "1".to_string()
}

fn default_decimal_places() -> u32 {
    4
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_currencies: default_currencies(),
            default_amount: default_amount(),
            decimal_places: default_decimal_places(),
            reference_policy: ReferencePolicy::default(),
            max_slots: None,
        }
    }
}

/// Market snapshot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path of the `coins/markets` JSON snapshot.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
    /// Seconds between snapshot reloads. Zero disables reloading.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_snapshot_path() -> String {
    "market.json".to_string()
}

fn default_refresh_secs() -> u64 {
    30
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("COINVERTER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("converter.default_currencies")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        if self.converter.default_currencies.is_empty() {
            return Err(AppError::Config(
                "converter.default_currencies must not be empty".to_string(),
            ));
        }
        if self.converter.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Config(format!(
                "converter.decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.converter.decimal_places
            )));
        }
        if self.converter.max_slots == Some(0) {
            return Err(AppError::Config(
                "converter.max_slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
