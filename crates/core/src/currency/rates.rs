//! Rate table snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use coinverter_shared::CurrencySymbol;
use rust_decimal::Decimal;

/// Read-only snapshot of currency rates against a common base (USD).
///
/// A rate is the number of base units one unit of the symbol is worth.
/// Symbols keep the order they were supplied in, which is the order the
/// currency picker offers them. Only positive rates are stored; the first
/// rate given for a symbol wins.
///
/// Tables are never mutated once built. A refresh builds a new table and
/// swaps it in whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    symbols: Vec<CurrencySymbol>,
    rates: HashMap<CurrencySymbol, Decimal>,
    as_of: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Creates an empty table. Every lookup on it falls back to `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time the snapshot was taken.
    #[must_use]
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Returns the rate for `symbol`, or `1` when it is unknown.
    ///
    /// Missing data is not an error: the converter keeps working with a
    /// neutral rate until a complete snapshot arrives.
    #[must_use]
    pub fn lookup(&self, symbol: &CurrencySymbol) -> Decimal {
        self.rates
            .get(symbol)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
            .unwrap_or(Decimal::ONE)
    }

    /// Returns the stored rate for `symbol`, without fallback.
    #[must_use]
    pub fn get(&self, symbol: &CurrencySymbol) -> Option<Decimal> {
        self.rates.get(symbol).copied()
    }

    /// Returns true if the table has a rate for `symbol`.
    #[must_use]
    pub fn contains(&self, symbol: &CurrencySymbol) -> bool {
        self.rates.contains_key(symbol)
    }

    /// Returns the known symbols in supply order.
    pub fn symbols(&self) -> impl Iterator<Item = &CurrencySymbol> {
        self.symbols.iter()
    }

    /// Number of distinct currencies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the table holds no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Time the snapshot was taken, if the source reported one.
    #[must_use]
    pub const fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }

    fn insert_first(&mut self, symbol: CurrencySymbol, rate: Decimal) {
        if rate <= Decimal::ZERO || symbol.is_empty() || self.rates.contains_key(&symbol) {
            return;
        }
        self.rates.insert(symbol.clone(), rate);
        self.symbols.push(symbol);
    }
}

impl FromIterator<(CurrencySymbol, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (CurrencySymbol, Decimal)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, rate) in iter {
            table.insert_first(symbol, rate);
        }
        table
    }
}

impl<'a> FromIterator<(&'a str, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, Decimal)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(symbol, rate)| (CurrencySymbol::new(symbol), rate))
            .collect()
    }
}
