//! Core types for Shelfcart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod kind;
pub mod line_item;
pub mod price;
pub mod tier;

pub use id::*;
pub use kind::{ProductKind, ProductKindError};
pub use line_item::LineItem;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use tier::{QuantityTier, TierError, active_tier, validate_tiers};
