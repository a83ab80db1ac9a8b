//! The cart store: sole owner and mutator of [`CartState`].
//!
//! Every mutating operation recomputes the derived aggregates and writes
//! through to the slot. Operations never fail toward the caller: bad input
//! is a logged no-op, an unknown id is a no-op, a corrupted snapshot
//! resets to empty, and a failed write leaves the in-memory state
//! authoritative for the rest of the session. A shopper can lose
//! persistence, never the session.

use tracing::{debug, warn};

use crate::migrate::parse_snapshot;
use crate::slot::CartSlot;
use crate::state::{CartState, NewLineItem};

/// The shopping cart store.
///
/// There is exactly one logical writer: all mutations arrive from UI
/// events on one thread, so the store takes `&mut self` and needs no
/// internal locking. If two windows ever share one slot, last write wins.
#[derive(Debug)]
pub struct CartStore<S: CartSlot> {
    state: CartState,
    slot: S,
}

impl<S: CartSlot> CartStore<S> {
    /// Open the cart, recovering the persisted snapshot if there is one.
    ///
    /// An absent snapshot yields an empty cart. An unparsable one also
    /// yields an empty cart and additionally clears the slot, so the
    /// corrupted value is not re-read on every visit. This never fails:
    /// a broken cart must not take the storefront down with it.
    pub fn open(slot: S) -> Self {
        let state = match slot.load() {
            Ok(Some(raw)) => parse_snapshot(&raw).map_or_else(
                || {
                    warn!("persisted cart snapshot is malformed, starting empty");
                    if let Err(e) = slot.clear() {
                        warn!("failed to clear malformed cart snapshot: {e}");
                    }
                    CartState::default()
                },
                CartState::from_items,
            ),
            Ok(None) => CartState::default(),
            Err(e) => {
                warn!("failed to load persisted cart: {e}");
                CartState::default()
            }
        };

        Self { state, slot }
    }

    /// The current cart state.
    ///
    /// In-memory state is the source of truth between writes; the slot is
    /// only a reload-recovery mechanism.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Add a selection to the cart.
    ///
    /// If an item with the same product/size/color key already exists its
    /// quantity is incremented and its product snapshot is left untouched
    /// (the shopper keeps the price they saw when they first added it).
    /// Otherwise the selection is appended as a new line item.
    ///
    /// A zero quantity or an empty size/color is rejected as a no-op.
    pub fn add_item(&mut self, item: NewLineItem) {
        if item.quantity == 0 {
            debug!(product = %item.product.id, "ignoring add_item with zero quantity");
            return;
        }
        if item.selected_size.trim().is_empty() || item.selected_color.trim().is_empty() {
            debug!(product = %item.product.id, "ignoring add_item without size or color");
            return;
        }

        let key = item.key();
        if let Some(existing) = self.state.items.iter_mut().find(|line| line.key() == key) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.state.items.push(crate::state::CartLineItem {
                id: key.render(),
                product: item.product,
                quantity: item.quantity,
                selected_size: item.selected_size,
                selected_color: item.selected_color,
            });
        }

        self.state.recompute();
        self.persist();
    }

    /// Remove the line item with the given id.
    ///
    /// Removing an id that is not in the cart is a no-op, not an error.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.state.items.len();
        self.state.items.retain(|item| item.id != id);
        if self.state.items.len() == before {
            return;
        }

        self.state.recompute();
        self.persist();
    }

    /// Set the quantity of the line item with the given id.
    ///
    /// A quantity of zero behaves exactly like [`Self::remove_item`]:
    /// a zero or negative quantity must never reach the persisted slot.
    /// An unknown id is a no-op.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        let Some(item) = self.state.items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        item.quantity = quantity;

        self.state.recompute();
        self.persist();
    }

    /// Empty the cart and remove the persisted slot entirely.
    ///
    /// A reload afterwards sees "no cart", not "empty cart".
    pub fn clear(&mut self) {
        self.state.items.clear();
        self.state.recompute();
        self.persist();
    }

    /// Toggle the cart drawer. Transient UI state, never persisted.
    pub const fn toggle_open(&mut self) {
        self.state.is_open = !self.state.is_open;
    }

    /// Set the cart drawer visibility. Transient UI state, never persisted.
    pub const fn set_open(&mut self, open: bool) {
        self.state.is_open = open;
    }

    /// Write-through to the slot.
    ///
    /// An empty cart clears the slot instead of writing `[]`. Failures are
    /// logged and swallowed: favoring uninterrupted shopping over
    /// persistence guarantees is a deliberate policy.
    fn persist(&self) {
        let result = if self.state.is_empty() {
            self.slot.clear()
        } else {
            match serde_json::to_string(&self.state.items) {
                Ok(snapshot) => self.slot.save(&snapshot),
                Err(e) => {
                    warn!("failed to serialize cart snapshot: {e}");
                    return;
                }
            }
        };

        if let Err(e) = result {
            warn!("failed to persist cart: {e}");
        }
    }
}
