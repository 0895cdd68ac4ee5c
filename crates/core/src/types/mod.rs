//! Core types for Babyshoe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod price;
pub mod session;
pub mod token;

pub use cart::{Cart, CartItem, ProductId};
pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use session::{AuthStatus, SessionState, SessionUser};
pub use token::ResetToken;
