//! Cart state and line-item types.
//!
//! The persisted representation is a JSON array of [`CartLineItem`] in
//! camelCase, matching the documented slot format. [`CartState`] itself is
//! never persisted whole: `total` and `item_count` are always recomputed
//! from the items, and `is_open` is transient UI state.

use kuyen_core::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::key::LineItemKey;

/// The product data captured when an item is added to the cart.
///
/// This is a snapshot, not a live reference: if the catalog price changes
/// later, lines already in the cart keep the price the shopper saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Pre-discount price if the product was on sale at add time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            images: product.images.clone(),
            category: product.category.clone(),
        }
    }
}

/// One entry in the cart: a product/size/color selection and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Rendered [`LineItemKey`]; unique across the cart.
    pub id: String,
    pub product: ProductSnapshot,
    /// Always >= 1; a quantity update to zero removes the line instead.
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

impl CartLineItem {
    /// The structural key this line item merges on.
    #[must_use]
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(
            self.product.id,
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// The line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A candidate line item, as submitted from a product page.
///
/// Has no `id` yet: the store derives it from the selection.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

impl NewLineItem {
    /// The key the store will merge this selection on.
    #[must_use]
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(
            self.product.id,
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }
}

/// The aggregate cart state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// Line items, unique by id, in insertion order.
    pub items: Vec<CartLineItem>,
    /// Derived: `sum(price * quantity)` over all items.
    pub total: Price,
    /// Derived: `sum(quantity)` over all items.
    pub item_count: u32,
    /// Whether the cart drawer is open. UI-only, never persisted.
    pub is_open: bool,
}

impl CartState {
    /// Build a state from loaded items, deriving the aggregates.
    #[must_use]
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut state = Self {
            items,
            ..Self::default()
        };
        state.recompute();
        state
    }

    /// Recompute `total` and `item_count` from `items`.
    pub fn recompute(&mut self) {
        self.total = self.items.iter().map(CartLineItem::line_total).sum();
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
