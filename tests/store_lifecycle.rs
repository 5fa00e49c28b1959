//! Integration test walking a full cart session against a JSON file backend.
//!
//! The session mirrors a typical storefront flow:
//!
//! 1. Open the store on a fresh directory - the cart starts empty.
//! 2. Add one Flat White (340 minor units, 8 in stock) - 1 item, 340 total.
//! 3. Add two more Flat Whites - the line merges to quantity 3, 1020 total.
//! 4. Add ten Banana Breads (280 minor units, 4 in stock) - the request
//!    clamps to 4, for 7 items and a 2140 total.
//! 5. Drop the Flat White quantity to 0 - it floors at 1, for 5 items and
//!    a 1460 total.
//! 6. Remove the Flat White line - 4 items and an 1120 total remain.
//! 7. Clear the cart - the stored snapshot is an empty document.
//!
//! After every step the snapshot on disk is the single source of truth for
//! the next session, so the test also asserts the stored JSON shape.

use std::fs;

use tempfile::tempdir;
use testresult::TestResult;

use trolley::{
    cart::{AppliedQuantity, NewCartLine},
    products::ProductId,
    repository::JsonFileRepository,
    store::CartStore,
};

fn flat_white(quantity: u32) -> NewCartLine {
    NewCartLine {
        product_id: ProductId::from("flat-white"),
        name: "Flat White".to_string(),
        unit_price: 340,
        image_ref: Some("flat-white.jpg".to_string()),
        quantity,
        available_stock: 8,
    }
}

fn banana_bread(quantity: u32) -> NewCartLine {
    NewCartLine {
        product_id: ProductId::from("banana-bread"),
        name: "Banana Bread".to_string(),
        unit_price: 280,
        image_ref: None,
        quantity,
        available_stock: 4,
    }
}

#[test]
fn cart_session_lifecycle() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("cart.json");

    let mut store = CartStore::open(JsonFileRepository::new(path.clone()));

    // 1. Fresh directory, empty cart
    assert!(store.cart().is_empty());
    assert_eq!(store.cart().total_items(), 0);
    assert_eq!(store.cart().total_amount(), 0);

    // 2. First Flat White
    let applied = store.add_item(flat_white(1));

    assert_eq!(applied, AppliedQuantity { quantity: 1, clamped: false });
    assert_eq!(store.cart().total_amount(), 340);

    // 3. Two more merge into the same line
    let applied = store.add_item(flat_white(2));

    assert_eq!(applied, AppliedQuantity { quantity: 3, clamped: false });
    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart().total_items(), 3);
    assert_eq!(store.cart().total_amount(), 1020);

    // 4. Banana Bread order outstrips stock and clamps to 4
    let applied = store.add_item(banana_bread(10));

    assert_eq!(applied, AppliedQuantity { quantity: 4, clamped: true });
    assert_eq!(store.cart().len(), 2);
    assert_eq!(store.cart().total_items(), 7);
    assert_eq!(store.cart().total_amount(), 2140);

    // The stored snapshot carries the same lines and materialized totals
    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;

    assert_eq!(stored["totalItems"], 7);
    assert_eq!(stored["totalAmount"], 2140);
    assert_eq!(stored["items"][0]["productId"], "flat-white");
    assert_eq!(stored["items"][0]["imageRef"], "flat-white.jpg");
    assert_eq!(stored["items"][1]["quantity"], 4);

    // 5. Quantity 0 floors at 1 rather than deleting the line
    let applied = store.update_quantity(0, 0)?;

    assert_eq!(applied, AppliedQuantity { quantity: 1, clamped: true });
    assert_eq!(store.cart().total_items(), 5);
    assert_eq!(store.cart().total_amount(), 1460);

    // 6. Removing the Flat White shifts Banana Bread to index 0
    let removed = store.remove_item(0)?;

    assert_eq!(removed.product_id(), &ProductId::from("flat-white"));
    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart().get_line(0)?.name(), "Banana Bread");
    assert_eq!(store.cart().total_items(), 4);
    assert_eq!(store.cart().total_amount(), 1120);

    // 7. Clearing leaves an empty snapshot on disk
    store.clear();

    assert!(store.cart().is_empty());

    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;

    assert_eq!(stored["items"], serde_json::json!([]));
    assert_eq!(stored["totalItems"], 0);
    assert_eq!(stored["totalAmount"], 0);

    Ok(())
}

#[test]
fn out_of_range_indexes_leave_the_session_untouched() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("cart.json");

    let mut store = CartStore::open(JsonFileRepository::new(path.clone()));

    store.add_item(flat_white(2));

    let before = fs::read_to_string(&path)?;

    assert!(store.remove_item(5).is_err());
    assert!(store.update_quantity(5, 1).is_err());

    // Rejected operations save nothing
    assert_eq!(fs::read_to_string(&path)?, before);
    assert_eq!(store.cart().total_items(), 2);

    Ok(())
}
