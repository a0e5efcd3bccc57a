//! Common types used across the application.

pub mod policy;
pub mod symbol;

pub use policy::ReferencePolicy;
pub use symbol::CurrencySymbol;
