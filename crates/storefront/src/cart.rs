//! Cart persisted in client storage.
//!
//! The cart never reaches the server from these pages; it lives in storage
//! under a single key and is read back for the header badge. Storage is
//! treated as unreliable: anything missing or unreadable is an empty cart,
//! and failed writes are logged rather than surfaced.

use std::sync::Arc;

use babyshoe_core::{Cart, CartItem};

use crate::browser::Storage;

/// Storage key holding the JSON-encoded cart.
pub const CART_STORAGE_KEY: &str = "fashion_cart_v1";

/// Reads and writes the cart in client storage.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Create a store over the given storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Load the cart, degrading to an empty cart on any failure.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read cart from storage");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored cart is corrupt, treating as empty");
            Cart::new()
        })
    }

    /// Persist the cart. Failures are logged.
    pub fn save(&self, cart: &Cart) {
        let json = match serde_json::to_string(cart) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Could not encode cart");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(CART_STORAGE_KEY, &json) {
            tracing::error!(error = %e, "Could not save cart to storage");
        }
    }

    /// Remove the cart entirely.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(CART_STORAGE_KEY) {
            tracing::error!(error = %e, "Could not clear cart from storage");
        }
    }

    /// Add a line, merging with an existing line for the same product.
    ///
    /// Returns the cart as saved.
    pub fn add(&self, item: CartItem) -> Cart {
        let mut cart = self.load();
        cart.add(item);
        self.save(&cart);
        cart
    }

    /// Total units in the cart (the badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.load().total_quantity()
    }
}
