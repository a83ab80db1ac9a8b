//! End-to-end shopping flow: browse the catalog, fill the cart from
//! product snapshots, and check out through the order gateway.

use kuyen_cart::{CartStore, MemorySlot};
use kuyen_core::{OrderStatus, Price, ProductId};
use kuyen_integration_tests::{fixture_catalog, selection_from};
use kuyen_storefront::catalog::{Catalog, InMemoryCatalog, ProductQuery};
use kuyen_storefront::checkout::{
    CheckoutError, InMemoryOrderGateway, ShippingAddress, place_order,
};

fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Millaray".to_string(),
        last_name: "Huenchumán".to_string(),
        email: "millaray@example.cl".to_string(),
        phone: "+56 9 1234 5678".to_string(),
        region: "Metropolitana".to_string(),
        commune: "Ñuñoa".to_string(),
        address: "Av. Irarrázaval".to_string(),
        number: "2821".to_string(),
        apartment: Some("1204".to_string()),
    }
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn browse_add_and_check_out() {
    let catalog = InMemoryCatalog::with_products(fixture_catalog());
    let slot = MemorySlot::new();
    let mut cart = CartStore::open(slot.clone());

    // Browse the gothic collection.
    let gothic = catalog
        .list_products(&ProductQuery::category("gotico"))
        .await
        .unwrap();
    assert_eq!(gothic.len(), 2);

    // Add one of each, then one more of the first.
    for product in &gothic {
        cart.add_item(selection_from(product, 1, "M", "Negro"));
    }
    let first = gothic.first().unwrap();
    cart.add_item(selection_from(first, 1, "M", "Negro"));

    assert_eq!(cart.state().items.len(), 2);
    assert_eq!(cart.state().item_count, 3);
    let expected_total: Price = cart
        .state()
        .items
        .iter()
        .map(|item| item.product.price.times(item.quantity))
        .sum();
    assert_eq!(cart.state().total, expected_total);

    // Check out.
    let gateway = InMemoryOrderGateway::new();
    let receipt = place_order(&mut cart, &gateway, address()).await.unwrap();
    assert_eq!(receipt.order_number, "KY-1001");

    // The cart is empty in memory and absent on disk.
    assert!(cart.state().is_empty());
    assert_eq!(
        kuyen_cart::CartSlot::load(&slot).unwrap(),
        None,
        "checkout must de-persist the cart, not write an empty array"
    );

    // The submitted order carries the denormalized lines.
    let submitted = gateway.submitted();
    assert_eq!(submitted.len(), 1);
    let (_, order) = submitted.first().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, expected_total);
    assert!(order.is_guest);
    assert!(
        order
            .items
            .iter()
            .any(|line| line.product_id == ProductId::new(4) && line.quantity == 2)
    );
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn add_time_snapshot_survives_catalog_price_change() {
    let catalog = InMemoryCatalog::with_products(fixture_catalog());
    let mut cart = CartStore::open(MemorySlot::new());

    let product = catalog
        .get_product_by_id(ProductId::new(2))
        .await
        .unwrap()
        .unwrap();
    cart.add_item(selection_from(&product, 1, "S", "Rosa Suave"));

    // The back-office raises the price after the item is in the cart.
    let mut updated = product.clone();
    updated.price = Price::from_pesos(99_990);
    catalog.update_product(updated).await.unwrap();

    // The cart still charges the price the shopper saw.
    assert_eq!(cart.state().total, Price::from_pesos(74_990));

    let gateway = InMemoryOrderGateway::new();
    let receipt = place_order(&mut cart, &gateway, address()).await.unwrap();
    let submitted = gateway.submitted();
    let (stored_receipt, order) = submitted.first().unwrap();
    assert_eq!(stored_receipt, &receipt);
    assert_eq!(order.items.first().unwrap().price, Price::from_pesos(74_990));
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let mut cart = CartStore::open(MemorySlot::new());
    let gateway = InMemoryOrderGateway::new();

    let result = place_order(&mut cart, &gateway, address()).await;
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(gateway.submitted().is_empty());
}
