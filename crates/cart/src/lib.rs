//! Shelfcart - Shopping cart state container.
//!
//! This crate holds a customer's cart, persists it to a durable key/value
//! store after every change, and derives totals using tiered quantity pricing.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the line items and is the only writer
//! - [`storage::KeyValueStore`] abstracts the durable store; [`storage::FileStore`]
//!   is the on-disk implementation and [`storage::MemoryStore`] the test double
//! - [`context::CartContext`] is built once at the application root and passed
//!   down to consumers explicitly
//! - Consumers observe changes through [`store::CartStore::subscribe`]
//!
//! Failures to read or write the durable store are logged with `tracing` and
//! never surface from the mutation API: the cart is convenience state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod context;
pub mod error;
pub mod pricing;
pub mod storage;
pub mod store;
pub mod summary;

pub use config::{CartConfig, ConfigError};
pub use context::CartContext;
pub use error::{CartError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartSnapshot, CartStore, SubscriptionId};
pub use summary::{CartLineView, CartSummary};

pub use shelfcart_core::{
    CurrencyCode, LineItem, LineItemId, Price, ProductKind, QuantityTier, TierError,
};
