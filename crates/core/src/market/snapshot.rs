//! CoinGecko `coins/markets` snapshots.
//!
//! The payload is fetched elsewhere; this module only decodes it into the
//! picker catalog and the rate table. Prices are quoted in USD, which
//! becomes the base currency of the session.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use coinverter_shared::CurrencySymbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::MarketError;
use crate::currency::RateTable;

/// One coin as returned by `coins/markets`. Unused fields are ignored.
#[derive(Debug, Deserialize)]
struct MarketCoin {
    #[serde(default)]
    id: String,
    symbol: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_price: Option<Decimal>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

/// A currency the picker dialog can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyOption {
    /// Provider id, e.g. `bitcoin`.
    pub id: String,
    /// Ticker symbol.
    pub symbol: CurrencySymbol,
    /// Display label, e.g. `Bitcoin (BTC)`.
    pub label: String,
    /// Icon URL.
    pub image_url: Option<String>,
    /// USD price per unit, if the provider quoted a positive one.
    pub price: Option<Decimal>,
}

/// Decoded market snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketSnapshot {
    catalog: Vec<CurrencyOption>,
    rates: RateTable,
}

impl MarketSnapshot {
    /// Decodes a `coins/markets` JSON array.
    ///
    /// Coins keep the provider's order (market cap, descending) and repeats
    /// of a symbol already seen are skipped. Coins without a positive price
    /// stay in the catalog but get no rate, so they convert at `1`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Json` if the payload is not a coin array.
    pub fn from_json(payload: &str) -> Result<Self, MarketError> {
        let coins: Vec<MarketCoin> = serde_json::from_str(payload)?;
        Ok(Self::from_coins(coins))
    }

    fn from_coins(coins: Vec<MarketCoin>) -> Self {
        let mut seen = HashSet::new();
        let mut as_of: Option<DateTime<Utc>> = None;
        let mut catalog = Vec::with_capacity(coins.len());

        for coin in coins {
            let symbol = CurrencySymbol::new(&coin.symbol);
            if symbol.is_empty() || !seen.insert(symbol.clone()) {
                debug!(symbol = %symbol, id = %coin.id, "Skipping repeated symbol");
                continue;
            }
            let price = coin.current_price.filter(|p| *p > Decimal::ZERO);
            if price.is_none() {
                debug!(symbol = %symbol, "Coin has no usable price");
            }
            as_of = as_of.max(coin.last_updated);
            catalog.push(CurrencyOption {
                label: format!("{} ({symbol})", coin.name),
                id: coin.id,
                symbol,
                image_url: coin.image,
                price,
            });
        }

        let mut rates: RateTable = catalog
            .iter()
            .filter_map(|option| Some((option.symbol.clone(), option.price?)))
            .collect();
        if let Some(at) = as_of {
            rates = rates.with_as_of(at);
        }

        Self { catalog, rates }
    }

    /// Currencies the picker offers, in provider order.
    #[must_use]
    pub fn catalog(&self) -> &[CurrencyOption] {
        &self.catalog
    }

    /// Looks up the catalog entry for `symbol`.
    #[must_use]
    pub fn option(&self, symbol: &CurrencySymbol) -> Option<&CurrencyOption> {
        self.catalog.iter().find(|option| option.symbol == *symbol)
    }

    /// Catalog symbols in provider order.
    pub fn symbols(&self) -> impl Iterator<Item = &CurrencySymbol> {
        self.catalog.iter().map(|option| &option.symbol)
    }

    /// Rate table built from the snapshot.
    #[must_use]
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Consumes the snapshot, keeping only the rate table.
    #[must_use]
    pub fn into_rates(self) -> RateTable {
        self.rates
    }
}
