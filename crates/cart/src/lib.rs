//! Küyen Cart - the client-side shopping cart state machine.
//!
//! This crate owns the authoritative representation of the shopping cart:
//! an ordered list of line items unique by their deterministic
//! product/size/color key, with the total and item count always derived
//! from the items, never stored independently.
//!
//! Every mutation writes through to a durable local slot (a small
//! key-value store surviving reloads) so the cart comes back on the next
//! visit. The slot is strictly a recovery mechanism: between writes the
//! in-memory [`CartStore`] is the source of truth, and a failed write
//! degrades to a stale cart after reload, never to a crashed session.
//!
//! # Modules
//!
//! - [`key`] - Deterministic line-item keys
//! - [`state`] - Cart state and line-item types
//! - [`migrate`] - Migration of legacy persisted snapshots
//! - [`slot`] - Durable local slot abstraction and implementations
//! - [`store`] - The [`CartStore`] itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod key;
pub mod migrate;
pub mod slot;
pub mod state;
pub mod store;

pub use key::LineItemKey;
pub use slot::{CartSlot, FileSlot, MemorySlot, SlotError};
pub use state::{CartLineItem, CartState, NewLineItem, ProductSnapshot};
pub use store::CartStore;

/// The fixed key under which the cart snapshot is persisted.
pub const CART_SLOT_KEY: &str = "kuyen_cart";
