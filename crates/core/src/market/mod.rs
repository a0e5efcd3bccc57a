//! Decoding of market snapshots into rate tables.

pub mod error;
pub mod snapshot;

pub use error::MarketError;
pub use snapshot::{CurrencyOption, MarketSnapshot};
