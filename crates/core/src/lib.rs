//! Babyshoe Core - Shared types library.
//!
//! This crate provides the domain types used across all Babyshoe components:
//! - `storefront` - Client-side storefront behaviour (forms, navigation, cart badge)
//! - `cli` - Headless driver for the storefront API
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Email addresses, session state, cart items, prices and reset tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
