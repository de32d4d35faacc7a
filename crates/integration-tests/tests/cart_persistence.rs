//! Persistence tests against the on-disk store.

#![allow(clippy::unwrap_used)]

use std::fs;

use rust_decimal::Decimal;
use shelfcart::{CartConfig, CartContext, CartStore, FileStore, KeyValueStore, MemoryStore};
use shelfcart_core::LineItem;
use shelfcart_integration_tests::{KEY, memory_cart, plain_item, tiered_item};

fn file_cart(dir: &std::path::Path) -> CartStore<FileStore> {
    CartStore::initialize(FileStore::new(dir), KEY)
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut cart = file_cart(dir.path());
    cart.add_to_cart(tiered_item("bulk", 3));
    cart.add_to_cart(plain_item("tee", 50, 4));
    drop(cart);

    let cart = file_cart(dir.path());
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 7);
    assert_eq!(cart.total_price(), Decimal::from(440));
}

#[test]
fn test_persisted_layout_is_line_item_array() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = file_cart(dir.path());
    cart.add_to_cart(tiered_item("bulk", 3).with_slug("bulk-pack"));

    let raw = fs::read_to_string(dir.path().join("cart-storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = value.as_array().unwrap().first().unwrap();

    assert_eq!(entry["id"], "bulk");
    assert_eq!(entry["type"], "physical");
    assert_eq!(entry["quantity"], 3);
    assert_eq!(entry["slug"], "bulk-pack");
    assert_eq!(entry["quantity_pricing"].as_array().unwrap().len(), 2);
    assert!(entry.get("image").is_none());
}

#[test]
fn test_corrupted_payload_reinitializes_empty() {
    let dir = tempfile::tempdir().unwrap();

    let mut cart = file_cart(dir.path());
    cart.add_to_cart(plain_item("a", 10, 1));
    cart.add_to_cart(plain_item("b", 20, 2));
    drop(cart);

    fs::write(dir.path().join("cart-storage.json"), "[{\"id\": \"a\", trunc").unwrap();

    let mut cart = file_cart(dir.path());
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);

    // The next mutation replaces the corrupted payload.
    cart.add_to_cart(plain_item("c", 5, 1));
    let reopened = file_cart(dir.path());
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_payload_written_by_browser_client_loads() {
    let mut storage = MemoryStore::new();
    storage.insert_raw(
        KEY,
        r#"[
            {"id":"p1","name":"Poster","price":100,"image":"/img/p1.png","type":"physical",
             "quantity":3,"slug":"poster",
             "quantity_pricing":[
                {"min_qty":1,"max_qty":2,"price_per_item":90},
                {"min_qty":3,"max_qty":null,"price_per_item":80,"courier_charge":12.5}
             ]},
            {"id":"c1","name":"Course","price":49.99,"type":"course","quantity":1}
        ]"#,
    );

    let cart = CartStore::initialize(storage, KEY);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_price(), Decimal::new(28999, 2));
}

#[test]
fn test_instances_sharing_storage_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = file_cart(dir.path());
    let mut second = file_cart(dir.path());

    first.add_to_cart(plain_item("a", 10, 1));
    second.add_to_cart(plain_item("b", 10, 1));

    let reopened = file_cart(dir.path());
    assert!(reopened.get("a").is_none());
    assert!(reopened.get("b").is_some());

    first.reload().unwrap();
    assert_eq!(first.items(), reopened.items());
}

#[test]
fn test_context_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = CartConfig {
        storage_dir: dir.path().join("carts"),
        storage_key: "guest-cart".to_string(),
        ..CartConfig::default()
    };

    let mut ctx = CartContext::from_config(&config);
    ctx.store_mut().add_to_cart(plain_item("tee", 50, 4));
    assert_eq!(ctx.summary().subtotal, "$200.00");

    let storage = FileStore::new(dir.path().join("carts"));
    let raw = storage.get("guest-cart").unwrap().unwrap();
    let items: Vec<LineItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(items.len(), 1);
}

#[test]
fn test_memory_cart_clear_persists_empty_array() {
    let mut cart = memory_cart();
    cart.add_to_cart(plain_item("a", 1, 1));
    cart.clear_cart();
    assert_eq!(cart.storage().raw(KEY), Some("[]"));
}
