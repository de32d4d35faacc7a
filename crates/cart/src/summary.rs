//! Display-ready cart views.
//!
//! Presentation code renders these instead of walking line items itself, so
//! formatting and tier pricing stay in one place.

use rust_decimal::Decimal;
use serde::Serialize;
use shelfcart_core::{CurrencyCode, LineItem, Price, ProductKind};

use crate::pricing;

/// One cart line, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub kind: ProductKind,
    pub quantity: u32,
    /// Effective unit price (tier price when a tier applies).
    pub unit_price: String,
    pub line_total: String,
    pub image: Option<String>,
    pub slug: Option<String>,
    /// Courier charge of the active tier, shown but not added to the subtotal.
    pub courier_charge: Option<String>,
}

/// The whole cart, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u64,
    pub requires_shipping: bool,
}

impl CartSummary {
    /// Create an empty cart summary.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::zero(currency).display(),
            item_count: 0,
            requires_shipping: false,
        }
    }

    /// Build a summary of `items` priced in `currency`.
    #[must_use]
    pub fn from_items(items: &[LineItem], currency: CurrencyCode) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| CartLineView::new(item, currency))
                .collect(),
            subtotal: format_amount(pricing::total_price(items), currency),
            item_count: pricing::item_count(items),
            requires_shipping: pricing::requires_shipping(items),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartLineView {
    fn new(item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            kind: item.kind,
            quantity: item.quantity,
            unit_price: format_amount(item.effective_unit_price(), currency),
            line_total: format_amount(pricing::line_total(item), currency),
            image: item.image.clone(),
            slug: item.slug.clone(),
            courier_charge: item
                .active_tier()
                .and_then(|tier| tier.courier_charge)
                .map(|charge| format_amount(charge, currency)),
        }
    }
}

fn format_amount(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}
