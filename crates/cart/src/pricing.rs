//! Cart aggregates.
//!
//! Each line is priced at its active tier's `price_per_item` when one covers
//! the current quantity, otherwise at its unit `price`. Tier courier charges
//! are not part of the total. Amounts past the `Decimal` range saturate at
//! `Decimal::MAX`.

use rust_decimal::Decimal;
use shelfcart_core::LineItem;

/// Price of one line: effective unit price times quantity.
#[must_use]
pub fn line_total(item: &LineItem) -> Decimal {
    item.effective_unit_price()
        .checked_mul(Decimal::from(item.quantity))
        .unwrap_or(Decimal::MAX)
}

/// Sum of [`line_total`] across all items.
#[must_use]
pub fn total_price(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(line_total)
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .unwrap_or(Decimal::MAX)
}

/// Sum of quantities across all items.
#[must_use]
pub fn item_count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Whether any item has to be shipped.
#[must_use]
pub fn requires_shipping(items: &[LineItem]) -> bool {
    items.iter().any(|item| item.kind.is_shippable())
}
