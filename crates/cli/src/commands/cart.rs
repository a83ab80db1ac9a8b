//! Inspect or reset the persisted cart slot.

use kuyen_cart::{CART_SLOT_KEY, CartSlot, CartStore, FileSlot};
use kuyen_storefront::config::StorefrontConfig;
use tracing::info;

/// Show the persisted cart snapshot, after migration.
///
/// # Errors
///
/// Returns an error if configuration loading fails.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let slot = FileSlot::new(&config.data_dir, CART_SLOT_KEY);
    let store = CartStore::open(slot);

    let state = store.state();
    if state.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    info!("{} line item(s):", state.items.len());
    for item in &state.items {
        info!(
            "  {} x{} ({} / {}) - {}",
            item.product.name,
            item.quantity,
            item.selected_size,
            item.selected_color,
            item.line_total()
        );
    }
    info!("Items: {}  Total: {}", state.item_count, state.total);

    Ok(())
}

/// Remove the persisted cart snapshot.
///
/// # Errors
///
/// Returns an error if configuration loading fails or the slot cannot be
/// cleared.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let slot = FileSlot::new(&config.data_dir, CART_SLOT_KEY);
    slot.clear()?;
    info!("Cart slot cleared");
    Ok(())
}
