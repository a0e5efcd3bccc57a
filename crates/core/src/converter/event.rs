//! User edit events.

use coinverter_shared::CurrencySymbol;
use serde::{Deserialize, Serialize};

/// A discrete edit coming from the UI.
///
/// Serialised as `{"kind": "amount" | "currency" | "add", "index": .., "value": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EditEvent {
    /// New text typed into a slot.
    Amount {
        /// Slot position.
        index: usize,
        /// Raw field text.
        value: String,
    },
    /// New currency picked for a slot.
    Currency {
        /// Slot position.
        index: usize,
        /// Picked symbol.
        value: CurrencySymbol,
    },
    /// "Add currency" pressed. Without a value the next unused currency is
    /// taken.
    Add {
        /// Currency for the new slot.
        #[serde(default)]
        value: Option<CurrencySymbol>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_amount_event() {
        let event: EditEvent =
            serde_json::from_str(r#"{"kind":"amount","index":0,"value":"1."}"#).unwrap();
        assert_eq!(
            event,
            EditEvent::Amount {
                index: 0,
                value: "1.".to_string()
            }
        );
    }

    #[test]
    fn test_decode_currency_event_normalises_symbol() {
        let event: EditEvent =
            serde_json::from_str(r#"{"kind":"currency","index":1,"value":"eth"}"#).unwrap();
        assert_eq!(
            event,
            EditEvent::Currency {
                index: 1,
                value: "ETH".into()
            }
        );
    }

    #[test]
    fn test_decode_add_event() {
        let bare: EditEvent = serde_json::from_str(r#"{"kind":"add"}"#).unwrap();
        assert_eq!(bare, EditEvent::Add { value: None });

        let with_value: EditEvent =
            serde_json::from_str(r#"{"kind":"add","value":"SOL"}"#).unwrap();
        assert_eq!(
            with_value,
            EditEvent::Add {
                value: Some("SOL".into())
            }
        );
    }

    #[test]
    fn test_decode_unknown_kind_fails() {
        assert!(serde_json::from_str::<EditEvent>(r#"{"kind":"delete","index":0}"#).is_err());
    }
}
