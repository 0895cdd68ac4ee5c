//! Locally persisted shopping cart.
//!
//! The cart is stored by the browser as a JSON array of line items. Product
//! pages write ids as strings (they come from `data-id` attributes) while older
//! entries carry numbers, so [`ProductId`] accepts both.

use core::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// Identifier of a product in the catalogue.
///
/// Two ids are equal when they render the same, so `1` and `"1"` refer to
/// the same product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id, as written by older cart entries.
    Number(i64),
    /// Textual id, as read from product markup.
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub id: ProductId,
    /// Product name at the time it was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit price at the time it was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Number of units; always positive for lines written by the storefront.
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart line.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: None,
            price: None,
            quantity,
        }
    }

    /// Set the product name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the unit price.
    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Unit price times quantity, if the unit price is known.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.map(|price| price * Decimal::from(self.quantity))
    }
}

/// An ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (the badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Sum of all line totals; lines without a price count as zero.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::usd(self.items.iter().filter_map(CartItem::line_total).sum())
    }

    /// Add a line, merging quantities with an existing line for the same product.
    ///
    /// Lines with a zero quantity are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                if item.name.is_some() {
                    existing.name = item.name;
                }
                if item.price.is_some() {
                    existing.price = item.price;
                }
            }
            None => self.items.push(item),
        }
    }

    /// Remove the line for a product, returning it if present.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        let mut cart = Self::new();
        for item in iter {
            cart.add(item);
        }
        cart
    }
}
