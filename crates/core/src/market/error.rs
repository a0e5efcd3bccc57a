//! Market snapshot error types.

use coinverter_shared::AppError;
use thiserror::Error;

/// Market snapshot errors.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The payload is not a valid `coins/markets` array.
    #[error("Malformed market snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<MarketError> for AppError {
    fn from(err: MarketError) -> Self {
        Self::MarketData(err.to_string())
    }
}
