//! Migration of legacy persisted cart snapshots.
//!
//! The persisted slot has carried three shapes over time:
//!
//! 1. line items with `size`/`color` fields and no `id`,
//! 2. line items with `selectedSize`/`selectedColor` and a concatenated
//!    `id` of the form `"{productId}-{size}-{color}"`,
//! 3. the current shape, with the collision-safe rendered key as `id`.
//!
//! [`parse_snapshot`] is a pure transform from the raw slot string to
//! current-shape line items. It renames the legacy fields, recomputes
//! every `id` from the deterministic key (which both backfills missing ids
//! and upgrades concatenated ones), normalizes an explicit
//! `originalPrice: null` to an absent field, and folds the oldest shape's
//! singular `product.image` string into the `images` list.
//!
//! Anything that still does not deserialize afterwards is treated as a
//! malformed snapshot: the caller gets `None` and starts from an empty
//! cart rather than crashing or keeping a half-parsed one.

use serde_json::Value;

use crate::key::LineItemKey;
use crate::state::CartLineItem;

/// Parse and migrate a persisted snapshot.
///
/// Returns `None` if the snapshot is not valid JSON, is not an array, or
/// contains any item that cannot be brought to the current shape
/// (including a zero or negative quantity, which the store never writes).
#[must_use]
pub fn parse_snapshot(raw: &str) -> Option<Vec<CartLineItem>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let Value::Array(raw_items) = value else {
        return None;
    };

    let mut migrated = Vec::with_capacity(raw_items.len());
    for mut item in raw_items {
        migrate_item(&mut item)?;
        migrated.push(item);
    }

    let items: Vec<CartLineItem> = serde_json::from_value(Value::Array(migrated)).ok()?;
    if items.iter().any(|item| item.quantity == 0) {
        return None;
    }
    Some(items)
}

/// Bring one raw line item to the current shape, in place.
///
/// Returns `None` if the item is structurally beyond repair (not an
/// object, or lacking the product reference the key derives from).
fn migrate_item(item: &mut Value) -> Option<()> {
    let object = item.as_object_mut()?;

    // Shape 1: rename legacy field names, keeping current ones if both
    // somehow exist.
    for (legacy, current) in [("size", "selectedSize"), ("color", "selectedColor")] {
        if !object.contains_key(current)
            && let Some(value) = object.remove(legacy)
        {
            object.insert(current.to_string(), value);
        }
    }

    if let Some(product) = object.get_mut("product").and_then(Value::as_object_mut) {
        // Normalize `originalPrice: null` to an absent field.
        if product.get("originalPrice").is_some_and(Value::is_null) {
            product.remove("originalPrice");
        }

        // The oldest snapshots embed one `image` string instead of an
        // `images` list; fold it in so the line keeps its picture.
        if !product.contains_key("images")
            && let Some(Value::String(image)) = product.remove("image")
        {
            product.insert("images".to_string(), Value::Array(vec![Value::String(image)]));
        }
    }

    // Shapes 1 and 2: recompute the id from the deterministic key. This
    // backfills items that predate ids and upgrades concatenated ids.
    let product_id = object.get("product")?.get("id")?.as_i64()?;
    let size = object.get("selectedSize")?.as_str()?.to_string();
    let color = object.get("selectedColor")?.as_str()?.to_string();
    let key = LineItemKey::new(product_id.into(), size, color);
    object.insert("id".to_string(), Value::String(key.render()));

    Some(())
}
