use std::collections::BTreeMap;

use shared::{
    domain::{MenuItem, MenuItemId},
    protocol::OrderLine,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    /// Copy of the item taken when it was first added; used for display only.
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartEntry {
    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// Items picked from one restaurant's menu. Entries always have a quantity of at least one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: BTreeMap<MenuItemId, CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item` and returns the resulting quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        let entry = self
            .entries
            .entry(item.id.clone())
            .or_insert_with(|| CartEntry {
                item: item.clone(),
                quantity: 0,
            });
        entry.quantity = entry.quantity.saturating_add(1);
        entry.quantity
    }

    /// Applies `delta` to an existing entry. Returns `None` when the item is not in the cart,
    /// otherwise the new quantity, where `Some(0)` means the entry was removed.
    pub fn change_quantity(&mut self, item_id: &MenuItemId, delta: i64) -> Option<u32> {
        let entry = self.entries.get_mut(item_id)?;
        let next = (i64::from(entry.quantity) + delta).clamp(0, i64::from(u32::MAX));
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next == 0 {
            self.entries.remove(item_id);
        } else {
            entry.quantity = next;
        }
        Some(next)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn total(&self) -> f64 {
        self.entries
            .values()
            .fold(0.0, |sum, entry| sum + entry.subtotal())
    }

    pub fn quantity_of(&self, item_id: &MenuItemId) -> Option<u32> {
        self.entries.get(item_id).map(|entry| entry.quantity)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order lines sent to the backend: ids and quantities only.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.entries
            .values()
            .map(|entry| OrderLine {
                menu_item_id: entry.item.id.clone(),
                quantity: entry.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
