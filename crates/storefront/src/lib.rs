//! Küyen Storefront library.
//!
//! The application logic surrounding the cart: catalog queries, checkout,
//! newsletter subscription, auth sessions, and configuration. Everything
//! that durably stores data (products, orders, subscribers) lives behind a
//! collaborator trait; the hosted data service is the real implementation
//! in production, and the in-memory/file-backed ones serve tests and
//! tooling.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod newsletter;
