//! Currency ticker symbols.
//!
//! Symbols come from the market data provider in lower case (`btc`) and are
//! shown in upper case everywhere else, so they are normalised once here.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ticker symbol of a currency, e.g. `BTC`.
///
/// Always stored trimmed and upper case. Two symbols compare equal when they
/// name the same ticker regardless of how they were spelled on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencySymbol(String);

impl CurrencySymbol {
    /// Creates a normalised symbol.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is empty after normalisation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CurrencySymbol {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for CurrencySymbol {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CurrencySymbol> for String {
    fn from(symbol: CurrencySymbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for CurrencySymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CurrencySymbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}
