//! The cart state container.
//!
//! [`CartStore`] owns the line items. Every mutation updates the in-memory
//! list, writes the full list to the durable store, then notifies
//! subscribers. Storage failures are logged and otherwise ignored.

use std::fmt;

use rust_decimal::Decimal;
use shelfcart_core::{LineItem, validate_tiers};
use tracing::instrument;

use crate::error::Result;
use crate::pricing;
use crate::storage::KeyValueStore;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

type Subscriber = Box<dyn FnMut(&CartSnapshot<'_>)>;

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Cart state as seen by subscribers after a change.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
    pub items: &'a [LineItem],
    pub total_price: Decimal,
    pub item_count: u64,
    pub is_open: bool,
}

impl<'a> CartSnapshot<'a> {
    fn new(items: &'a [LineItem], is_open: bool) -> Self {
        Self {
            items,
            total_price: pricing::total_price(items),
            item_count: pricing::item_count(items),
            is_open,
        }
    }
}

/// A shopping cart persisted to a [`KeyValueStore`].
pub struct CartStore<S> {
    items: Vec<LineItem>,
    is_open: bool,
    storage: S,
    key: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store and rehydrate it from `storage[key]`.
    ///
    /// A missing, unreadable or malformed payload yields an empty cart; the
    /// failure is logged, not returned.
    pub fn initialize(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match load(&storage, &key) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable cart payload");
                Vec::new()
            }
        };

        tracing::debug!(key = %key, items = items.len(), "Cart initialized");

        Self {
            items,
            is_open: false,
            storage,
            key,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Re-read the persisted list, replacing the in-memory one.
    ///
    /// Picks up writes made by another instance sharing the same storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the payload cannot be read or decoded; the
    /// in-memory cart is left unchanged in that case.
    pub fn reload(&mut self) -> Result<()> {
        self.items = load(&self.storage, &self.key)?;
        self.notify();
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add an item, merging with an existing entry of the same id.
    ///
    /// On merge the new attributes overwrite the old ones and the quantities
    /// are summed. A new item with quantity zero is ignored.
    #[instrument(skip(self, item), fields(id = %item.id, quantity = item.quantity))]
    pub fn add_to_cart(&mut self, item: LineItem) {
        if let Some(tiers) = item.quantity_pricing.as_deref()
            && let Err(e) = validate_tiers(tiers)
        {
            tracing::warn!(error = %e, "Line item has inconsistent quantity tiers");
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.merge(item);
        } else if item.quantity == 0 {
            tracing::debug!("Ignoring new line item with zero quantity");
            return;
        } else {
            self.items.push(item);
        }

        self.commit();
    }

    /// Remove the item with `id`. Absent ids are a no-op.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id.as_str() != id);
        if self.items.len() != before {
            self.commit();
        }
    }

    /// Set the quantity of `id`, removing the item when `quantity <= 0`.
    ///
    /// Quantities above `u32::MAX` saturate. Unknown ids are a no-op.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|i| i.id.as_str() == id) else {
            return;
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.commit();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit();
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Sum of line totals, using quantity tiers where they apply.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        pricing::total_price(&self.items)
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        pricing::item_count(&self.items)
    }

    #[must_use]
    pub fn requires_shipping(&self) -> bool {
        pricing::requires_shipping(&self.items)
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current state in the form handed to subscribers.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot<'_> {
        CartSnapshot::new(&self.items, self.is_open)
    }

    // =========================================================================
    // Cart panel
    // =========================================================================

    /// Whether the cart panel is open. Never persisted.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open or close the cart panel, notifying subscribers on change.
    pub fn set_open(&mut self, open: bool) {
        if self.is_open != open {
            self.is_open = open;
            self.notify();
        }
    }

    pub fn toggle_open(&mut self) {
        self.set_open(!self.is_open);
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register `callback` to run after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CartSnapshot<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// The storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage back-end.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self) {
        if let Err(e) = self.persist() {
            tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
        }
        self.notify();
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.items)?;
        self.storage.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, items = self.items.len(), "Cart persisted");
        Ok(())
    }

    fn notify(&mut self) {
        let snapshot = CartSnapshot::new(&self.items, self.is_open);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("is_open", &self.is_open)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// Read and decode the persisted list. Entries with zero quantity are dropped.
fn load<S: KeyValueStore>(storage: &S, key: &str) -> Result<Vec<LineItem>> {
    let Some(payload) = storage.get(key)? else {
        return Ok(Vec::new());
    };
    let mut items: Vec<LineItem> = serde_json::from_str(&payload)?;
    items.retain(|item| item.quantity > 0);
    Ok(items)
}
