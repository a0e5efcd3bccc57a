//! Core conversion logic for Coinverter.
//!
//! This crate contains pure logic with ZERO network or storage dependencies.
//! It consumes a rate snapshot and user edits, and produces display amounts.
//!
//! # Modules
//!
//! - `currency` - Rate tables and base-value arithmetic
//! - `amount` - Lenient parsing and fixed-precision formatting of field text
//! - `converter` - The multi-slot conversion engine
//! - `market` - Decoding of market snapshots into rate tables

pub mod amount;
pub mod converter;
pub mod currency;
pub mod market;

pub use amount::{ParsedAmount, format_amount, parse_amount};
pub use converter::{ConversionEngine, EditEvent, EngineOptions, Slot, SlotView};
pub use currency::RateTable;
pub use market::{CurrencyOption, MarketError, MarketSnapshot};
