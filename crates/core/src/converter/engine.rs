//! Conversion engine.
//!
//! The engine is a plain value. Every operation borrows the current state and
//! returns the next one, so the UI holds the latest engine and re-renders it.
//!
//! Recompute rule: the reference slot fixes the base value,
//! `base = amount(ref) * rate(ref)`, and every other slot shows
//! `base / rate(slot)` at display precision. Rates are looked up on every
//! recompute, never cached per slot.

use std::sync::Arc;

use coinverter_shared::config::ConverterConfig;
use coinverter_shared::{CurrencySymbol, ReferencePolicy};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::event::EditEvent;
use super::slot::{Slot, SlotView};
use crate::amount::{format_amount, parse_amount};
use crate::currency::{RateTable, from_base, to_base};

/// Default number of decimal places of converted amounts.
pub const DEFAULT_DECIMAL_PLACES: u32 = 4;

/// Tunables of a conversion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Decimal places of converted amounts.
    pub decimal_places: u32,
    /// Which slot anchors the base value on currency changes.
    pub policy: ReferencePolicy,
    /// Optional hard cap on the number of slots.
    pub max_slots: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            policy: ReferencePolicy::default(),
            max_slots: None,
        }
    }
}

impl From<&ConverterConfig> for EngineOptions {
    fn from(config: &ConverterConfig) -> Self {
        Self {
            decimal_places: config.decimal_places,
            policy: config.reference_policy,
            max_slots: config.max_slots,
        }
    }
}

/// Keeps N amount slots consistent with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionEngine {
    slots: Vec<Slot>,
    rates: Arc<RateTable>,
    catalog: Vec<CurrencySymbol>,
    options: EngineOptions,
    reference: Option<usize>,
    base_value: Decimal,
}

impl ConversionEngine {
    /// Creates an engine with no slots.
    #[must_use]
    pub fn new(rates: Arc<RateTable>, options: EngineOptions) -> Self {
        Self {
            slots: Vec::new(),
            rates,
            catalog: Vec::new(),
            options,
            reference: None,
            base_value: Decimal::ZERO,
        }
    }

    /// Starts a session with one slot per currency, all from `default_amount`.
    ///
    /// Slot 0 keeps the text as given and becomes the reference; the other
    /// slots are converted from it. Existing slots are discarded. With
    /// `max_slots` set, currencies beyond the cap are dropped.
    #[must_use]
    pub fn initialize<I>(&self, currencies: I, default_amount: &str) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CurrencySymbol>,
    {
        let amount = parse_amount(default_amount).effective();
        let cap = self.options.max_slots.unwrap_or(usize::MAX);
        let slots = currencies
            .into_iter()
            .take(cap)
            .map(|currency| Slot::new(default_amount.to_string(), currency.into(), amount))
            .collect::<Vec<_>>();

        let mut next = Self {
            slots,
            rates: Arc::clone(&self.rates),
            catalog: self.catalog.clone(),
            options: self.options,
            reference: None,
            base_value: Decimal::ZERO,
        };
        if !next.slots.is_empty() {
            next.recompute_from(0);
        }
        debug!(slots = next.slots.len(), base = %next.base_value, "Initialized conversion session");
        next
    }

    /// Sets the text of slot `index` and converts every other slot from it.
    ///
    /// The edited slot keeps the text exactly as typed. Text that does not
    /// parse, or parses negative, counts as zero. An out-of-range index
    /// leaves the session unchanged.
    #[must_use]
    pub fn edit_amount(&self, index: usize, new_text: &str) -> Self {
        let mut next = self.clone();
        let Some(slot) = next.slots.get_mut(index) else {
            warn!(index, slots = self.slots.len(), "Ignoring amount edit for unknown slot");
            return next;
        };
        slot.set_text(new_text.to_string(), parse_amount(new_text).effective());
        next.recompute_from(index);
        debug!(index, base = %next.base_value, "Applied amount edit");
        next
    }

    /// Shows slot `index` in `new_symbol`.
    ///
    /// The base value is preserved, so the quantity represented does not
    /// change, except under `ReferencePolicy::FirstSlot` when slot 0 is
    /// changed: then slot 0 keeps its number and the base follows it.
    /// Unknown symbols convert at rate `1`. An out-of-range index or an
    /// unchanged symbol leaves the session unchanged.
    #[must_use]
    pub fn edit_currency(&self, index: usize, new_symbol: impl Into<CurrencySymbol>) -> Self {
        let new_symbol = new_symbol.into();
        let mut next = self.clone();
        let Some(slot) = next.slots.get_mut(index) else {
            warn!(index, slots = self.slots.len(), "Ignoring currency edit for unknown slot");
            return next;
        };
        if *slot.currency() == new_symbol {
            return next;
        }
        if !self.rates.contains(&new_symbol) {
            debug!(symbol = %new_symbol, "No rate for picked currency, using 1");
        }
        slot.set_currency(new_symbol);

        if self.options.policy == ReferencePolicy::FirstSlot && index == 0 {
            next.recompute_from(0);
        } else if next.reference == Some(index) {
            next.redisplay(None);
        } else {
            next.redisplay(next.reference);
        }
        debug!(index, base = %next.base_value, "Applied currency edit");
        next
    }

    /// Appends a slot in `currency` showing the current base value.
    ///
    /// No-op once the session shows as many slots as there are currencies
    /// on offer, or as many as `max_slots` allows.
    #[must_use]
    pub fn add_slot(&self, currency: impl Into<CurrencySymbol>) -> Self {
        let mut next = self.clone();
        if !self.can_add_slot() {
            debug!(slots = self.slots.len(), capacity = self.capacity(), "Slot pool exhausted");
            return next;
        }
        let currency = currency.into();
        let amount = from_base(self.base_value, self.rates.lookup(&currency)).unwrap_or(Decimal::ZERO);
        next.slots.push(Slot::new(
            format_amount(amount, self.options.decimal_places),
            currency,
            amount,
        ));
        if next.reference.is_none() {
            next.reference = Some(next.slots.len() - 1);
        }
        debug!(slots = next.slots.len(), "Added slot");
        next
    }

    /// Appends a slot in the first offered currency no slot shows yet.
    ///
    /// No-op when every currency is already shown or the cap is reached.
    #[must_use]
    pub fn add_next_slot(&self) -> Self {
        match self.unused_currencies().into_iter().next() {
            Some(currency) => self.add_slot(currency),
            None => {
                debug!(slots = self.slots.len(), "No unused currency left to add");
                self.clone()
            }
        }
    }

    /// Applies one UI event.
    #[must_use]
    pub fn apply(&self, event: &EditEvent) -> Self {
        match event {
            EditEvent::Amount { index, value } => self.edit_amount(*index, value),
            EditEvent::Currency { index, value } => self.edit_currency(*index, value.clone()),
            EditEvent::Add { value: Some(currency) } => self.add_slot(currency.clone()),
            EditEvent::Add { value: None } => self.add_next_slot(),
        }
    }

    /// Swaps in a refreshed rate table.
    ///
    /// The reference slot's number is kept; the base value is re-derived
    /// from it under the new rates and the other slots are recomputed.
    #[must_use]
    pub fn with_rates(&self, rates: Arc<RateTable>) -> Self {
        let mut next = self.clone();
        next.rates = rates;
        if let Some(reference) = next.reference {
            next.recompute_from(reference);
        }
        debug!(
            currencies = next.rates.len(),
            base = %next.base_value,
            "Applied rate refresh"
        );
        next
    }

    /// Sets the currencies the picker offers, in picker order.
    ///
    /// Offered currencies need not have a rate; those convert at `1`.
    /// Repeated symbols are kept once. Without a catalog the rate table's
    /// currencies are offered.
    #[must_use]
    pub fn with_catalog<I>(&self, currencies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CurrencySymbol>,
    {
        let mut catalog: Vec<CurrencySymbol> = Vec::new();
        for symbol in currencies.into_iter().map(Into::into) {
            if !symbol.is_empty() && !catalog.contains(&symbol) {
                catalog.push(symbol);
            }
        }
        let mut next = self.clone();
        next.catalog = catalog;
        debug!(currencies = next.catalog.len(), "Applied currency catalog");
        next
    }

    /// Currencies on offer: the catalog, or the rate table without one.
    pub fn offered_currencies(&self) -> impl Iterator<Item = &CurrencySymbol> {
        let from_rates = if self.catalog.is_empty() {
            Some(self.rates.symbols())
        } else {
            None
        };
        self.catalog.iter().chain(from_rates.into_iter().flatten())
    }

    /// Offered currencies no slot shows yet, in offer order.
    #[must_use]
    pub fn unused_currencies(&self) -> Vec<CurrencySymbol> {
        self.offered_currencies()
            .filter(|symbol| self.slots.iter().all(|slot| slot.currency() != *symbol))
            .cloned()
            .collect()
    }

    /// Returns true if `add_slot` would append a slot.
    #[must_use]
    pub fn can_add_slot(&self) -> bool {
        self.slots.len() < self.capacity()
    }

    /// Maximum number of slots the session can grow to by adding.
    #[must_use]
    pub fn capacity(&self) -> usize {
        let offered = self.offered_currencies().count();
        self.options
            .max_slots
            .map_or(offered, |cap| cap.min(offered))
    }

    /// Slots in display order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Render views of the slots in display order.
    #[must_use]
    pub fn views(&self) -> Vec<SlotView<'_>> {
        self.slots.iter().map(Slot::view).collect()
    }

    /// Base-currency value every slot represents.
    #[must_use]
    pub const fn base_value(&self) -> Decimal {
        self.base_value
    }

    /// Position of the slot that currently anchors the base value.
    #[must_use]
    pub const fn reference_index(&self) -> Option<usize> {
        self.reference
    }

    /// Rate table in use.
    #[must_use]
    pub fn rates(&self) -> &Arc<RateTable> {
        &self.rates
    }

    /// Session options.
    #[must_use]
    pub const fn options(&self) -> EngineOptions {
        self.options
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the session has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Makes `reference` the anchor and re-derives everything from it.
    fn recompute_from(&mut self, reference: usize) {
        let slot = &mut self.slots[reference];
        let rate = self.rates.lookup(slot.currency());
        self.base_value = match to_base(slot.amount(), rate) {
            Some(base) => base,
            None => {
                warn!(index = reference, "Base value overflowed, using 0");
                slot.clear_amount();
                Decimal::ZERO
            }
        };
        self.reference = Some(reference);
        self.redisplay(Some(reference));
    }

    /// Re-renders every slot except `keep` from the current base value.
    fn redisplay(&mut self, keep: Option<usize>) {
        let base = self.base_value;
        let decimal_places = self.options.decimal_places;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if keep == Some(index) {
                continue;
            }
            let amount = from_base(base, self.rates.lookup(slot.currency())).unwrap_or(Decimal::ZERO);
            slot.set_text(format_amount(amount, decimal_places), amount);
        }
    }
}
