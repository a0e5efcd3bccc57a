//! Shared types, errors, and configuration for Coinverter.
//!
//! This crate provides common types used across all other crates:
//! - Currency symbols and the reference-slot policy
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{CurrencySymbol, ReferencePolicy};
