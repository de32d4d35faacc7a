//! Cart line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::LineItemId;
use super::kind::ProductKind;
use super::tier::{QuantityTier, active_tier};

/// One product entry in the cart.
///
/// The serialized field names form the persisted cart layout:
/// `id, name, price, image?, type, quantity, slug?, quantity_pricing?`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier; the cart holds at most one entry per id.
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Unit price used when no quantity tier applies.
    pub price: Decimal,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Ordered quantity price breaks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_pricing: Option<Vec<QuantityTier>>,
}

impl LineItem {
    /// Create a line item with a quantity of one.
    #[must_use]
    pub fn new(
        id: impl Into<LineItemId>,
        name: impl Into<String>,
        price: Decimal,
        kind: ProductKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            kind,
            quantity: 1,
            slug: None,
            quantity_pricing: None,
        }
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn with_quantity_pricing(mut self, tiers: Vec<QuantityTier>) -> Self {
        self.quantity_pricing = Some(tiers);
        self
    }

    /// The tier active at the current quantity, if any.
    #[must_use]
    pub fn active_tier(&self) -> Option<&QuantityTier> {
        self.quantity_pricing
            .as_deref()
            .and_then(|tiers| active_tier(tiers, self.quantity))
    }

    /// Unit price at the current quantity: the active tier's price, else `price`.
    #[must_use]
    pub fn effective_unit_price(&self) -> Decimal {
        self.active_tier()
            .map_or(self.price, |tier| tier.price_per_item)
    }

    /// Overlay `other`'s attributes onto this entry and add its quantity.
    ///
    /// Optional attributes absent on `other` keep their current value.
    /// The quantity saturates at `u32::MAX`.
    pub fn merge(&mut self, other: Self) {
        self.name = other.name;
        self.price = other.price;
        self.kind = other.kind;
        self.quantity = self.quantity.saturating_add(other.quantity);
        if other.image.is_some() {
            self.image = other.image;
        }
        if other.slug.is_some() {
            self.slug = other.slug;
        }
        if other.quantity_pricing.is_some() {
            self.quantity_pricing = other.quantity_pricing;
        }
    }
}
