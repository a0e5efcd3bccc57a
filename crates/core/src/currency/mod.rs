//! Rate tables and base-value arithmetic.

pub mod conversion;
pub mod rates;

#[cfg(test)]
mod props;

pub use conversion::{from_base, round_display, to_base};
pub use rates::RateTable;
