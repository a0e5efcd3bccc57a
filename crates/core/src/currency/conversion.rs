//! Base-value conversion arithmetic.
//!
//! Every slot is converted through the common base currency:
//! - `base = amount * rate(currency)`
//! - `amount = base / rate(currency)`
//!
//! Rates reaching these functions come from `RateTable::lookup`, so they are
//! always positive. Overflow yields `None` and callers degrade it to zero.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Expresses `amount` units of a currency in the base currency.
#[must_use]
pub fn to_base(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate)
}

/// Expresses a base-currency value in units of a currency with `rate`.
#[must_use]
pub fn from_base(base: Decimal, rate: Decimal) -> Option<Decimal> {
    base.checked_div(rate)
}

/// Rounds a value for display using Banker's Rounding.
///
/// Uses `RoundingStrategy::MidpointNearestEven` so that repeated
/// re-rendering of the same value never drifts upward.
#[must_use]
pub fn round_display(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_base() {
        // 2 BTC at 60000 USD each = 120000 USD
        assert_eq!(to_base(dec!(2), dec!(60000)), Some(dec!(120000)));
    }

    #[test]
    fn test_from_base() {
        // 120000 USD / 3000 USD per ETH = 40 ETH
        assert_eq!(from_base(dec!(120000), dec!(3000)), Some(dec!(40)));
    }

    #[test]
    fn test_from_base_zero_rate_is_none() {
        assert_eq!(from_base(dec!(1), Decimal::ZERO), None);
    }

    #[test]
    fn test_to_base_overflow_is_none() {
        assert_eq!(to_base(Decimal::MAX, dec!(2)), None);
    }

    #[test]
    fn test_round_display_bankers() {
        assert_eq!(round_display(dec!(0.00005), 4), dec!(0.0000));
        assert_eq!(round_display(dec!(0.00015), 4), dec!(0.0002));
        assert_eq!(round_display(dec!(40), 4), dec!(40));
        assert_eq!(round_display(dec!(0.123456), 4), dec!(0.1235));
    }
}
