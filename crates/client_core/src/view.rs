//! Plain-text rendering of session state for the terminal front ends.

use std::fmt::Write as _;

use shared::{
    domain::format_money,
    protocol::{Order, OrderResult},
};

use crate::session::{SessionState, Summary};

pub fn restaurants(state: &SessionState) -> String {
    if state.restaurants.is_empty() {
        return "No restaurants yet.\n".to_string();
    }

    let selected_id = state.selected.as_ref().map(|restaurant| &restaurant.id);
    let mut out = String::new();
    for (index, restaurant) in state.restaurants.iter().enumerate() {
        let marker = if Some(&restaurant.id) == selected_id { '*' } else { ' ' };
        let rating = restaurant
            .rating
            .map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}"));
        let delivery = restaurant
            .delivery_time_min
            .map_or_else(|| "?".to_string(), |minutes| minutes.to_string());
        let _ = writeln!(
            out,
            "{marker} {}. {} ({}) | rating {rating} | {delivery} min  [{}]",
            index + 1,
            restaurant.name,
            restaurant.cuisine,
            restaurant.id,
        );
    }
    out
}

pub fn menu(state: &SessionState) -> String {
    let Some(restaurant) = &state.selected else {
        return "Select a restaurant to view its menu.\n".to_string();
    };
    if state.menu.is_empty() {
        return format!("Menu - {}\nNo items yet.\n", restaurant.name);
    }

    let mut out = format!("Menu - {} ({} items)\n", restaurant.name, state.menu.len());
    for (index, item) in state.menu.iter().enumerate() {
        let vegetarian = if item.vegetarian { " (v)" } else { "" };
        let _ = writeln!(
            out,
            "  {}. {}{vegetarian}  {}  [{}]",
            index + 1,
            item.title,
            format_money(item.price),
            item.id,
        );
        if let Some(description) = &item.description {
            let _ = writeln!(out, "     {description}");
        }
    }
    out
}

pub fn cart(state: &SessionState) -> String {
    if state.cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for entry in state.cart.entries() {
        let _ = writeln!(
            out,
            "  {} x{}  ({} each)  {}",
            entry.item.title,
            entry.quantity,
            format_money(entry.item.price),
            format_money(entry.subtotal()),
        );
    }
    let _ = writeln!(out, "Total {}", format_money(state.cart.total()));
    out
}

pub fn order_result(result: &OrderResult) -> String {
    let total = result
        .total
        .map_or_else(|| "unknown".to_string(), format_money);
    format!("Order placed! Total: {total}. Status: {}\n", result.status)
}

pub fn orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> String {
    let mut out = String::new();
    for order in orders {
        let _ = writeln!(
            out,
            "  {}  {} | {} | {} items",
            order.customer_name,
            format_money(order.total),
            order.status,
            order.items.len(),
        );
    }
    if out.is_empty() {
        out.push_str("No orders yet.\n");
    }
    out
}

pub fn summary(summary: &Summary) -> String {
    format!(
        "Restaurants: {}  Menu items: {}  Orders: {}\n",
        summary.restaurants, summary.menu_items, summary.orders
    )
}
