//! Property-based tests for base-value arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{from_base, round_display, to_base};
use super::rates::RateTable;

/// Strategy to generate non-negative amounts (0.0000 to 1,000,000.0000).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate positive rates (0.00000001 to 100,000.00000000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000_000i64).prop_map(|v| Decimal::new(v, 8))
}

/// Strategy to generate display precision (0 to 8).
fn decimal_places() -> impl Strategy<Value = u32> {
    0u32..=8
}

/// Relative closeness, exact for zero.
fn close(a: Decimal, b: Decimal) -> bool {
    let tolerance = Decimal::new(1, 12);
    let scale = a.abs().max(b.abs()).max(Decimal::ONE);
    (a - b).abs() <= tolerance * scale
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting into the base and back returns the original amount.
    #[test]
    fn prop_base_round_trip(amount in amount(), rate in positive_rate()) {
        let base = to_base(amount, rate).unwrap();
        let back = from_base(base, rate).unwrap();
        prop_assert!(close(back, amount), "{} -> {} -> {}", amount, base, back);
    }

    /// Two currencies agree on the base value of a converted amount.
    #[test]
    fn prop_cross_conversion_preserves_base(
        amount in amount(),
        from_rate in positive_rate(),
        to_rate in positive_rate(),
    ) {
        let base = to_base(amount, from_rate).unwrap();
        let converted = from_base(base, to_rate).unwrap();
        let base_again = to_base(converted, to_rate).unwrap();
        prop_assert!(close(base, base_again), "{} vs {}", base, base_again);
    }

    /// Display rounding never keeps more than the requested places.
    #[test]
    fn prop_round_display_scale(amount in amount(), rate in positive_rate(), dp in decimal_places()) {
        let value = from_base(amount, rate).unwrap();
        let rounded = round_display(value, dp);
        prop_assert!(rounded.scale() <= dp, "{} has scale {}", rounded, rounded.scale());
    }

    /// Lookup never yields a non-positive rate.
    #[test]
    fn prop_lookup_is_positive(raw in -1_000i64..1_000i64) {
        let table: RateTable = [("BTC", Decimal::new(raw, 2))].into_iter().collect();
        prop_assert!(table.lookup(&"BTC".into()) > Decimal::ZERO);
    }
}
