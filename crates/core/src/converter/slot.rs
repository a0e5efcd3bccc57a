//! Slot types.

use coinverter_shared::CurrencySymbol;
use rust_decimal::Decimal;
use serde::Serialize;

/// One amount field bound to a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    raw_text: String,
    currency: CurrencySymbol,
    amount: Decimal,
}

impl Slot {
    pub(crate) fn new(raw_text: String, currency: CurrencySymbol, amount: Decimal) -> Self {
        Self {
            raw_text,
            currency,
            amount,
        }
    }

    /// Text shown in the field.
    ///
    /// For the slot the user typed in this is the text exactly as typed. For
    /// every other slot it is the converted amount at display precision.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Currency the slot is shown in.
    #[must_use]
    pub const fn currency(&self) -> &CurrencySymbol {
        &self.currency
    }

    /// Numeric value of the slot.
    ///
    /// The parsed text (zero when unparseable or negative) for the typed
    /// slot, the unrounded conversion for the others.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn set_text(&mut self, raw_text: String, amount: Decimal) {
        self.raw_text = raw_text;
        self.amount = amount;
    }

    /// Zeroes the numeric value, keeping the text.
    pub(crate) fn clear_amount(&mut self) {
        self.amount = Decimal::ZERO;
    }

    pub(crate) fn set_currency(&mut self, currency: CurrencySymbol) {
        self.currency = currency;
    }

    /// Borrowed render view of the slot.
    #[must_use]
    pub fn view(&self) -> SlotView<'_> {
        SlotView {
            text: &self.raw_text,
            currency: &self.currency,
        }
    }
}

/// What the UI renders for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotView<'a> {
    /// Field text.
    pub text: &'a str,
    /// Currency symbol.
    pub currency: &'a CurrencySymbol,
}
