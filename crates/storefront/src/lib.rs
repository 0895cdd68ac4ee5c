//! Babyshoe storefront client.
//!
//! Page behaviour for the Babyshoe shop, independent of any particular UI:
//! controllers talk to the session API through [`session::SessionApi`] and to
//! the page through small view traits, so the same logic drives a browser
//! front end, the `babyshoe` CLI and the tests.
//!
//! # Pages
//!
//! - [`auth::AuthFormController`] - login / signup / forgot-password form
//! - [`auth::ResetFormController`] - reset-password form
//! - [`home::HomePage`] - landing page with header, menu, slideshow and filters
//!
//! Each implements [`events::PageHandler`] and is run with [`events::mount`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod browser;
pub mod cart;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod home;
pub mod menu;
pub mod nav;
pub mod notify;
pub mod session;
pub mod slideshow;
pub mod timer;
pub mod validation;

#[cfg(test)]
mod testing;
