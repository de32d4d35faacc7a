//! Shelfcart Core - Shared cart types.
//!
//! This crate provides the data model used by every Shelfcart component:
//! - `shelfcart` - Cart state container with durable persistence
//! - `shelfcart-cli` - Command-line access to a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Line items, quantity tiers, product kinds, ids and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
