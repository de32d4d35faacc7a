//! Cart commands.
//!
//! Each command writes its human-readable result to `out`; diagnostics go
//! through `tracing`.

use std::io::Write;
use std::str::FromStr;

use rust_decimal::Decimal;
use shelfcart::{CartContext, KeyValueStore, LineItem, Price, ProductKind, QuantityTier};
use thiserror::Error;

/// Errors from parsing command arguments or writing output.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Price argument is not a decimal number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Tier argument is not `MIN:MAX:PRICE[:COURIER]`.
    #[error("Invalid tier {0:?}: {1}")]
    InvalidTier(String, &'static str),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Arguments of the `add` command.
pub struct NewItem<'a> {
    pub id: String,
    pub name: String,
    pub price: &'a str,
    pub kind: ProductKind,
    pub quantity: u32,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub tiers: &'a [String],
}

/// Build a line item from `add` arguments.
///
/// # Errors
///
/// Returns `CommandError` if the price or a tier cannot be parsed.
pub fn build_item(args: NewItem<'_>) -> Result<LineItem, CommandError> {
    let price = parse_decimal(args.price)
        .ok_or_else(|| CommandError::InvalidPrice(args.price.to_string()))?;

    let mut item = LineItem::new(args.id, args.name, price, args.kind).with_quantity(args.quantity);
    if let Some(slug) = args.slug {
        item = item.with_slug(slug);
    }
    if let Some(image) = args.image {
        item = item.with_image(image);
    }
    if !args.tiers.is_empty() {
        let tiers = args
            .tiers
            .iter()
            .map(|spec| parse_tier(spec))
            .collect::<Result<Vec<_>, _>>()?;
        item = item.with_quantity_pricing(tiers);
    }
    Ok(item)
}

/// Parse `MIN:MAX:PRICE[:COURIER]`. `MAX` may be `*` or empty for unbounded.
///
/// # Errors
///
/// Returns `CommandError::InvalidTier` describing the bad part.
pub fn parse_tier(spec: &str) -> Result<QuantityTier, CommandError> {
    let invalid = |reason| CommandError::InvalidTier(spec.to_string(), reason);
    let parts: Vec<&str> = spec.split(':').collect();

    let (min, max, price, courier) = match parts.as_slice() {
        [min, max, price] => (*min, *max, *price, None),
        [min, max, price, courier] => (*min, *max, *price, Some(*courier)),
        _ => return Err(invalid("expected MIN:MAX:PRICE[:COURIER]")),
    };

    let min = min.trim().parse::<u32>().map_err(|_| invalid("bad minimum"))?;
    let max = match max.trim() {
        "" | "*" => None,
        value => Some(value.parse::<u32>().map_err(|_| invalid("bad maximum"))?),
    };
    let price = parse_decimal(price).ok_or_else(|| invalid("bad price"))?;

    let mut tier = QuantityTier::new(min, max, price);
    if let Some(courier) = courier {
        let charge = parse_decimal(courier).ok_or_else(|| invalid("bad courier charge"))?;
        tier = tier.with_courier_charge(charge);
    }
    Ok(tier)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

// =============================================================================
// Commands
// =============================================================================

/// Print the cart summary.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn show<S: KeyValueStore>(
    ctx: &CartContext<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let summary = ctx.summary();
    if summary.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for line in &summary.items {
        write!(
            out,
            "{:<20} {:<9} {:>5} x {:>10} = {:>10}",
            line.id,
            line.kind.as_str(),
            line.quantity,
            line.unit_price,
            line.line_total
        )?;
        if let Some(courier) = &line.courier_charge {
            write!(out, "  (courier {courier})")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Items: {}", summary.item_count)?;
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    Ok(())
}

/// Add an item and print the new item count.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn add<S: KeyValueStore>(
    ctx: &mut CartContext<S>,
    item: LineItem,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let id = item.id.clone();
    ctx.store_mut().add_to_cart(item);
    let quantity = ctx.store().get(id.as_str()).map_or(0, |i| i.quantity);
    tracing::info!(id = %id, quantity, "Added to cart");
    writeln!(out, "{id}: {quantity} in cart")?;
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn remove<S: KeyValueStore>(
    ctx: &mut CartContext<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if ctx.store().get(id).is_none() {
        tracing::warn!(id, "Not in cart");
    }
    ctx.store_mut().remove_from_cart(id);
    writeln!(out, "Items: {}", ctx.store().item_count())?;
    Ok(())
}

/// Set a quantity.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn update<S: KeyValueStore>(
    ctx: &mut CartContext<S>,
    id: &str,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    ctx.store_mut().update_quantity(id, quantity);
    match ctx.store().get(id) {
        Some(item) => writeln!(out, "{id}: {} in cart", item.quantity)?,
        None => writeln!(out, "{id}: not in cart")?,
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn clear<S: KeyValueStore>(
    ctx: &mut CartContext<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    ctx.store_mut().clear_cart();
    tracing::info!("Cart cleared");
    writeln!(out, "Cart is empty")?;
    Ok(())
}

/// Print the item count.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn count<S: KeyValueStore>(
    ctx: &CartContext<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    writeln!(out, "{}", ctx.store().item_count())?;
    Ok(())
}

/// Print the total price.
///
/// # Errors
///
/// Returns `CommandError::Io` if writing fails.
pub fn total<S: KeyValueStore>(
    ctx: &CartContext<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let total = Price::new(ctx.store().total_price(), ctx.currency());
    writeln!(out, "{total}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shelfcart::{CartStore, CurrencyCode, MemoryStore};

    use super::*;

    fn ctx() -> CartContext<MemoryStore> {
        CartContext::new(
            CartStore::initialize(MemoryStore::new(), "cart-storage"),
            CurrencyCode::USD,
        )
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CommandError>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn bulk(quantity: u32, tiers: &[String]) -> LineItem {
        build_item(NewItem {
            id: "bulk".to_string(),
            name: "Bulk Pack".to_string(),
            price: "100",
            kind: ProductKind::Physical,
            quantity,
            slug: None,
            image: None,
            tiers,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_tier_bounded() {
        let tier = parse_tier("1:2:90").unwrap();
        assert_eq!(tier, QuantityTier::new(1, Some(2), Decimal::from(90)));
    }

    #[test]
    fn test_parse_tier_unbounded_with_courier() {
        let tier = parse_tier("3:*:80.50:15").unwrap();
        assert_eq!(tier.max_qty, None);
        assert_eq!(tier.price_per_item, Decimal::new(8050, 2));
        assert_eq!(tier.courier_charge, Some(Decimal::from(15)));

        assert_eq!(parse_tier("3::80").unwrap().max_qty, None);
    }

    #[test]
    fn test_parse_tier_rejects_garbage() {
        assert!(matches!(parse_tier("1:2"), Err(CommandError::InvalidTier(_, _))));
        assert!(matches!(parse_tier("x:2:1"), Err(CommandError::InvalidTier(_, "bad minimum"))));
        assert!(matches!(parse_tier("1:2:free"), Err(CommandError::InvalidTier(_, "bad price"))));
    }

    #[test]
    fn test_build_item_rejects_bad_price() {
        let err = build_item(NewItem {
            id: "x".to_string(),
            name: "X".to_string(),
            price: "ten",
            kind: ProductKind::Digital,
            quantity: 1,
            slug: None,
            image: None,
            tiers: &[],
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid price: ten");
    }

    #[test]
    fn test_add_then_total() {
        let mut ctx = ctx();
        let tiers = vec!["1:2:90".to_string(), "3:*:80".to_string()];

        let added = output(|out| add(&mut ctx, bulk(3, &tiers), out));
        assert_eq!(added, "bulk: 3 in cart\n");

        assert_eq!(output(|out| total(&ctx, out)), "$240.00\n");
        assert_eq!(output(|out| count(&ctx, out)), "3\n");
    }

    #[test]
    fn test_update_negative_removes() {
        let mut ctx = ctx();
        output(|out| add(&mut ctx, bulk(2, &[]), out));
        let updated = output(|out| update(&mut ctx, "bulk", -1, out));
        assert_eq!(updated, "bulk: not in cart\n");
        assert!(ctx.store().is_empty());
    }

    #[test]
    fn test_show_lists_lines() {
        let mut ctx = ctx();
        output(|out| add(&mut ctx, bulk(2, &[]), out));

        let shown = output(|out| show(&ctx, out));
        assert!(shown.contains("bulk"));
        assert!(shown.contains("$200.00"));
        assert!(shown.ends_with("Subtotal: $200.00\n"));
    }

    #[test]
    fn test_show_and_clear_empty() {
        let mut ctx = ctx();
        output(|out| add(&mut ctx, bulk(1, &[]), out));
        assert_eq!(output(|out| clear(&mut ctx, out)), "Cart is empty\n");
        assert_eq!(output(|out| show(&ctx, out)), "Cart is empty\n");
        assert_eq!(output(|out| remove(&mut ctx, "bulk", out)), "Items: 0\n");
    }
}
