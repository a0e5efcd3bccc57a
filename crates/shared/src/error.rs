//! Application-wide error types.
//!
//! The conversion engine itself never fails. These errors belong to the
//! edges around it: loading configuration, reading market snapshots and
//! decoding edit events.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Market snapshot could not be read or decoded.
    #[error("Market data error: {0}")]
    MarketData(String),

    /// Edit event could not be decoded.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Returns the stable error code for logs and machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::MarketData(_) => "MARKET_DATA_ERROR",
            Self::InvalidEvent(_) => "INVALID_EVENT",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Returns true if the session can carry on after this error.
    ///
    /// A bad event line or a failed snapshot reload leaves the previous
    /// state intact.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidEvent(_) | Self::MarketData(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
