//! Cart persistence against the real file slot: round-trips across
//! reopenings, migration of legacy snapshots, and corruption recovery.

use kuyen_cart::{CART_SLOT_KEY, CartSlot, CartStore, FileSlot};
use kuyen_core::Price;
use kuyen_integration_tests::{fixture_catalog, selection_from};

#[test]
#[allow(clippy::unwrap_used)]
fn file_slot_round_trip_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = fixture_catalog();

    {
        let slot = FileSlot::new(dir.path(), CART_SLOT_KEY);
        let mut cart = CartStore::open(slot);
        cart.add_item(selection_from(catalog.first().unwrap(), 2, "M", "Negro"));
        cart.add_item(selection_from(catalog.get(2).unwrap(), 1, "S", "Amarillo"));
    }

    assert!(dir.path().join("kuyen_cart.json").exists());

    let reloaded = CartStore::open(FileSlot::new(dir.path(), CART_SLOT_KEY));
    assert_eq!(reloaded.state().items.len(), 2);
    assert_eq!(reloaded.state().item_count, 3);
    assert_eq!(
        reloaded.state().total,
        Price::from_pesos(2 * 89_990 + 69_990)
    );
}

#[test]
#[allow(clippy::unwrap_used)]
fn emptying_the_cart_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = fixture_catalog();
    let slot = FileSlot::new(dir.path(), CART_SLOT_KEY);
    let mut cart = CartStore::open(slot.clone());

    cart.add_item(selection_from(catalog.first().unwrap(), 1, "L", "Borgoña"));
    assert!(slot.path().exists());

    let id = cart.state().items.first().unwrap().id.clone();
    cart.update_quantity(&id, 0);

    assert!(cart.state().is_empty());
    assert!(!slot.path().exists(), "empty cart must de-persist the file");

    let reloaded = CartStore::open(slot);
    assert!(reloaded.state().is_empty());
}

#[test]
#[allow(clippy::unwrap_used)]
fn legacy_snapshot_is_migrated_on_open() {
    // A snapshot written by the previous storefront: bare `size`/`color`
    // fields, dash-concatenated ids, an explicit null originalPrice, and a
    // singular product `image`.
    let legacy = r#"[
        {
            "id": "1-M-Negro",
            "product": {
                "id": 1,
                "name": "Vestido Luna Nocturna",
                "price": 89990,
                "originalPrice": null,
                "image": "/images/1.webp",
                "category": "gotico"
            },
            "quantity": 2,
            "size": "M",
            "color": "Negro"
        },
        {
            "id": "2-S-Rosa Suave",
            "product": {
                "id": 2,
                "name": "Vestido Flor de Cerezo",
                "price": 74990,
                "images": ["/images/2.webp"],
                "category": "primaveral"
            },
            "quantity": 1,
            "size": "S",
            "color": "Rosa Suave"
        }
    ]"#;

    let dir = tempfile::tempdir().unwrap();
    let slot = FileSlot::new(dir.path(), CART_SLOT_KEY);
    slot.save(legacy).unwrap();

    let mut cart = CartStore::open(slot.clone());
    assert_eq!(cart.state().items.len(), 2);
    assert_eq!(cart.state().item_count, 3);
    assert_eq!(cart.state().total, Price::from_pesos(2 * 89_990 + 74_990));

    let first = cart.state().items.first().unwrap();
    assert_eq!(first.id, "1:M:Negro");
    assert_eq!(first.selected_size, "M");
    assert_eq!(first.selected_color, "Negro");
    assert_eq!(first.product.original_price, None);
    assert_eq!(first.product.images, vec!["/images/1.webp"]);

    let second = cart.state().items.get(1).unwrap();
    assert_eq!(second.id, "2:S:Rosa%20Suave");

    // A mutation rewrites the slot in the current shape; the next open
    // needs no migration and sees the same items.
    cart.update_quantity("1:M:Negro", 1);
    let persisted = slot.load().unwrap().unwrap();
    assert!(persisted.contains("selectedSize"));
    assert!(!persisted.contains("\"size\""));

    let reloaded = CartStore::open(slot);
    assert_eq!(reloaded.state().item_count, 2);
}

#[test]
#[allow(clippy::unwrap_used)]
fn corrupted_file_resets_to_empty_and_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let slot = FileSlot::new(dir.path(), CART_SLOT_KEY);
    slot.save("{\"items\": oops").unwrap();

    let cart = CartStore::open(slot.clone());
    assert!(cart.state().is_empty());
    assert!(
        !slot.path().exists(),
        "a malformed snapshot must not be re-read on the next visit"
    );
}

#[test]
#[allow(clippy::unwrap_used)]
fn snapshot_with_invalid_item_is_discarded_whole() {
    let dir = tempfile::tempdir().unwrap();
    let slot = FileSlot::new(dir.path(), CART_SLOT_KEY);

    // Second item has no product; the whole snapshot is untrusted.
    let raw = r#"[
        {
            "id": "1:M:Negro",
            "product": {"id": 1, "name": "Vestido", "price": 89990, "images": [], "category": "gotico"},
            "quantity": 1,
            "selectedSize": "M",
            "selectedColor": "Negro"
        },
        {"id": "2:S:Rosa", "quantity": 1, "selectedSize": "S", "selectedColor": "Rosa"}
    ]"#;
    slot.save(raw).unwrap();

    let cart = CartStore::open(slot);
    assert!(cart.state().is_empty());
}
