//! Core types for Küyen.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use product::{Product, SortKey};
pub use status::OrderStatus;
