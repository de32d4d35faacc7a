//! Integration tests for Shelfcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelfcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart behaviour over the in-memory store
//! - `cart_persistence` - Rehydration and corruption recovery on disk
//!
//! This library holds the fixtures shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use shelfcart::{CartStore, MemoryStore};
use shelfcart_core::{LineItem, ProductKind, QuantityTier};

/// Storage key used by every fixture.
pub const KEY: &str = "cart-storage";

/// A fresh cart over an empty in-memory store.
#[must_use]
pub fn memory_cart() -> CartStore<MemoryStore> {
    CartStore::initialize(MemoryStore::new(), KEY)
}

/// A physical item without tiers.
#[must_use]
pub fn plain_item(id: &str, price: i64, quantity: u32) -> LineItem {
    LineItem::new(id, format!("Item {id}"), Decimal::from(price), ProductKind::Physical)
        .with_quantity(quantity)
}

/// Unit price 100 with breaks at 1-2 (90) and 3+ (80).
#[must_use]
pub fn tiered_item(id: &str, quantity: u32) -> LineItem {
    plain_item(id, 100, quantity).with_quantity_pricing(vec![
        QuantityTier::new(1, Some(2), Decimal::from(90)),
        QuantityTier::new(3, None, Decimal::from(80)),
    ])
}
