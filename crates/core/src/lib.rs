//! Küyen Core - Shared types library.
//!
//! This crate provides common types used across all Küyen components:
//! - `cart` - Client-side shopping cart state machine
//! - `storefront` - Catalog, checkout, newsletter, and session logic
//! - `cli` - Command-line tools for seeding and inspection
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   statuses, plus the catalog product model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
