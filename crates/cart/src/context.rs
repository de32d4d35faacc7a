//! Application-root cart context.
//!
//! Build one [`CartContext`] where the application starts and pass it to the
//! components that read or change the cart. There is no global instance.

use shelfcart_core::CurrencyCode;

use crate::config::CartConfig;
use crate::storage::{FileStore, KeyValueStore};
use crate::store::CartStore;
use crate::summary::CartSummary;

/// The cart plus the settings its consumers need to render it.
#[derive(Debug)]
pub struct CartContext<S = FileStore> {
    store: CartStore<S>,
    currency: CurrencyCode,
}

impl CartContext<FileStore> {
    /// Create a context backed by a [`FileStore`] in `config.storage_dir`.
    ///
    /// The cart is rehydrated immediately; an unreadable payload yields an
    /// empty cart.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        let storage = FileStore::new(&config.storage_dir);
        tracing::info!(
            dir = %config.storage_dir.display(),
            key = %config.storage_key,
            "Opening cart"
        );
        Self::new(
            CartStore::initialize(storage, config.storage_key.clone()),
            config.currency,
        )
    }
}

impl<S: KeyValueStore> CartContext<S> {
    /// Wrap an existing store.
    #[must_use]
    pub const fn new(store: CartStore<S>, currency: CurrencyCode) -> Self {
        Self { store, currency }
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Get a mutable reference to the cart store.
    pub fn store_mut(&mut self) -> &mut CartStore<S> {
        &mut self.store
    }

    /// Currency used for display.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Display-ready view of the current cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(self.store.items(), self.currency)
    }

    /// Consume the context, returning the store.
    #[must_use]
    pub fn into_store(self) -> CartStore<S> {
        self.store
    }
}
