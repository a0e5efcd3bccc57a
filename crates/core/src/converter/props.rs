//! Property-based tests for the conversion engine.
//!
//! - Consistency: all slots represent the same base value
//! - Idempotence of currency changes
//! - Currency round-trip restores the amount

use std::sync::Arc;

use coinverter_shared::ReferencePolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::{ConversionEngine, EngineOptions};
use super::event::EditEvent;
use crate::currency::RateTable;

const SYMBOLS: [&str; 5] = ["BTC", "ETH", "SOL", "USDT", "UNLISTED"];

/// Strategy to generate positive rates (0.0001 to 100,000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Rates for every symbol except `UNLISTED`, which falls back to 1.
fn rate_table() -> impl Strategy<Value = Arc<RateTable>> {
    prop::collection::vec(positive_rate(), 4).prop_map(|rates| {
        Arc::new(SYMBOLS.iter().copied().zip(rates).collect::<RateTable>())
    })
}

fn symbol() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SYMBOLS.to_vec())
}

/// Field text: mostly numbers, sometimes junk.
fn amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (0i64..100_000_000i64).prop_map(|v| Decimal::new(v, 3).to_string()),
        1 => Just(String::new()),
        1 => Just("abc".to_string()),
        1 => Just("-3".to_string()),
        1 => Just("1.".to_string()),
    ]
}

fn policy() -> impl Strategy<Value = ReferencePolicy> {
    prop_oneof![Just(ReferencePolicy::LastEdited), Just(ReferencePolicy::FirstSlot)]
}

fn event() -> impl Strategy<Value = EditEvent> {
    prop_oneof![
        3 => (0usize..4, amount_text()).prop_map(|(index, value)| EditEvent::Amount { index, value }),
        2 => (0usize..4, symbol()).prop_map(|(index, value)| EditEvent::Currency {
            index,
            value: value.into(),
        }),
        1 => Just(EditEvent::Add { value: None }),
    ]
}

/// A session after an arbitrary history of edits.
fn session() -> impl Strategy<Value = ConversionEngine> {
    (
        rate_table(),
        policy(),
        prop::collection::vec(symbol(), 1..4),
        amount_text(),
        prop::collection::vec(event(), 0..12),
    )
        .prop_map(|(rates, policy, currencies, amount, events)| {
            let options = EngineOptions {
                policy,
                ..EngineOptions::default()
            };
            let engine = ConversionEngine::new(rates, options).initialize(currencies, &amount);
            events.iter().fold(engine, |engine, event| engine.apply(event))
        })
}

fn close(a: Decimal, b: Decimal) -> bool {
    let tolerance = Decimal::new(1, 6);
    let scale = a.abs().max(b.abs());
    if scale.is_zero() {
        return true;
    }
    (a - b).abs() <= tolerance * scale
}

fn assert_consistent(engine: &ConversionEngine) -> Result<(), TestCaseError> {
    let rates = engine.rates();
    let values: Vec<Decimal> = engine
        .slots()
        .iter()
        .map(|slot| slot.amount() * rates.lookup(slot.currency()))
        .collect();
    for value in &values {
        prop_assert!(
            close(*value, engine.base_value()),
            "slot base {} differs from session base {}",
            value,
            engine.base_value()
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After any history of edits every slot agrees on the base value.
    #[test]
    fn prop_session_is_consistent(engine in session()) {
        assert_consistent(&engine)?;
    }

    /// An amount edit leaves the session consistent and the text as typed.
    #[test]
    fn prop_edit_amount_consistent(engine in session(), index in 0usize..4, text in amount_text()) {
        let next = engine.edit_amount(index, &text);
        assert_consistent(&next)?;
        if let Some(slot) = next.slots().get(index) {
            prop_assert_eq!(slot.raw_text(), text.as_str());
        }
    }

    /// A currency edit leaves the session consistent.
    #[test]
    fn prop_edit_currency_consistent(engine in session(), index in 0usize..4, to in symbol()) {
        let next = engine.edit_currency(index, to);
        assert_consistent(&next)?;
    }

    /// Picking the same currency twice equals picking it once.
    #[test]
    fn prop_edit_currency_idempotent(engine in session(), index in 0usize..4, to in symbol()) {
        let once = engine.edit_currency(index, to);
        let twice = once.edit_currency(index, to);
        prop_assert_eq!(once, twice);
    }

    /// Switching a slot A -> B -> A restores its amount.
    #[test]
    fn prop_edit_currency_round_trip(engine in session(), index in 0usize..4, via in symbol()) {
        let Some(slot) = engine.slots().get(index) else {
            return Ok(());
        };
        let original = slot.currency().clone();
        let before = slot.amount();
        let after = engine
            .edit_currency(index, via)
            .edit_currency(index, original)
            .slots()[index]
            .amount();
        prop_assert!(close(before, after), "{} became {}", before, after);
    }

    /// Changing a currency never changes the represented quantity
    /// unless slot 0 anchors the session.
    #[test]
    fn prop_edit_currency_preserves_base(engine in session(), index in 0usize..4, to in symbol()) {
        let next = engine.edit_currency(index, to);
        let anchored = engine.options().policy == ReferencePolicy::FirstSlot && index == 0;
        if !anchored {
            prop_assert_eq!(next.base_value(), engine.base_value());
        }
    }

    /// Slots never outgrow the offered currencies.
    #[test]
    fn prop_add_slot_capped(engine in session(), to in symbol()) {
        let next = engine.add_slot(to);
        prop_assert!(next.len() <= engine.len().max(engine.capacity()));
        prop_assert!(next.len() <= engine.len() + 1);
    }

    /// Unparseable input propagates zero to every slot.
    #[test]
    fn prop_bad_input_zeroes_session(engine in session()) {
        prop_assume!(!engine.is_empty());
        let next = engine.edit_amount(0, "abc");
        prop_assert_eq!(next.slots()[0].amount(), Decimal::ZERO);
        for slot in &next.slots()[1..] {
            prop_assert_eq!(slot.raw_text(), "0.0000");
        }
    }
}
