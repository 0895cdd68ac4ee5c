//! Local cart commands.

use babyshoe_core::{CartItem, ProductId};
use rust_decimal::Decimal;

use super::Context;

/// Log every line and the totals.
pub fn show(ctx: &Context) {
    let cart = ctx.cart().load();
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for item in cart.items() {
        tracing::info!(
            id = %item.id,
            name = item.name.as_deref().unwrap_or("-"),
            quantity = item.quantity,
            "Cart line"
        );
    }
    tracing::info!(
        items = cart.total_quantity(),
        subtotal = %cart.subtotal(),
        "Cart total"
    );
}

/// Add a line. Numeric ids are stored as numbers, like the product pages do.
pub fn add(
    ctx: &Context,
    id: String,
    quantity: u32,
    name: Option<String>,
    price: Option<Decimal>,
) {
    let id = id
        .parse::<i64>()
        .map_or_else(|_| ProductId::from(id), ProductId::from);

    let mut item = CartItem::new(id, quantity);
    if let Some(name) = name {
        item = item.with_name(name);
    }
    if let Some(price) = price {
        item = item.with_price(price);
    }

    let cart = ctx.cart().add(item);
    tracing::info!(items = cart.total_quantity(), "Added to cart");
}

pub fn clear(ctx: &Context) {
    ctx.cart().clear();
    tracing::info!("Cart cleared");
}
