//! Multi-slot currency conversion.
//!
//! A session is an ordered list of slots, each an amount shown in one
//! currency. All slots express the same base value; editing one slot's text
//! or currency re-derives every other slot from it.

pub mod engine;
pub mod event;
pub mod slot;


#[cfg(test)]
mod props;

pub use engine::{ConversionEngine, EngineOptions};
pub use event::EditEvent;
pub use slot::{Slot, SlotView};
