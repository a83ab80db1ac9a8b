//! Integration tests for Küyen.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kuyen-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Browse, add to cart, check out
//! - `cart_persistence` - Slot round-trips, migration, corruption recovery
//! - `catalog_query` - Filtering, search, and sorting against fixtures
//!
//! This crate's library part holds shared fixtures; the tests live under
//! `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{Duration, Utc};
use kuyen_cart::{NewLineItem, ProductSnapshot};
use kuyen_core::{Price, Product, ProductId};

/// Build a catalog fixture product.
#[must_use]
pub fn fixture_product(id: i64, name: &str, pesos: i64, category: &str, age_days: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("Descripción de {name}"),
        price: Price::from_pesos(pesos),
        original_price: None,
        images: vec![format!("/images/{id}.webp")],
        category: category.to_string(),
        sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
        colors: vec!["Negro".to_string(), "Borgoña".to_string()],
        in_stock: true,
        featured: false,
        rating: None,
        created_at: Utc::now() - Duration::days(age_days),
    }
}

/// The standard four-product fixture catalog.
#[must_use]
pub fn fixture_catalog() -> Vec<Product> {
    vec![
        fixture_product(1, "Vestido Luna Nocturna", 89_990, "gotico", 30),
        fixture_product(2, "Vestido Flor de Cerezo", 74_990, "primaveral", 10),
        fixture_product(3, "Vestido Sol Radiante", 69_990, "veraniego", 5),
        fixture_product(4, "Vestido Místico Lunar", 119_990, "gotico", 1),
    ]
}

/// Build a cart selection from a catalog product, the way the product
/// page does: snapshot at add time.
#[must_use]
pub fn selection_from(product: &Product, quantity: u32, size: &str, color: &str) -> NewLineItem {
    NewLineItem {
        product: ProductSnapshot::from(product),
        quantity,
        selected_size: size.to_string(),
        selected_color: color.to_string(),
    }
}
