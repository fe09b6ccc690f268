//! Text rendering of the inventory and cart lists.

use std::io::Write;

use crate::domain::{CartItem, InventoryItem, ItemId};
use crate::staging::StagingArea;

/// Presentation collaborator. Each call replaces the whole list it draws.
pub trait View: Send + Sync {
    fn render_inventory(&self, inventory: &[InventoryItem], staging: &StagingArea);
    fn render_cart(&self, cart: &[CartItem]);
    fn render_staged(&self, id: ItemId, quantity: u32);
}

pub fn inventory_lines(inventory: &[InventoryItem], staging: &StagingArea) -> Vec<String> {
    inventory
        .iter()
        .map(|item| format!("#{} {} [{}]", item.id, item.content, staging.staged(item.id)))
        .collect()
}

pub fn cart_lines(cart: &[CartItem]) -> Vec<String> {
    cart.iter()
        .map(|item| format!("#{} {} x {}", item.id, item.content, item.amount))
        .collect()
}

/// Draws both lists to stdout.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl ConsoleView {
    fn print(&self, title: &str, lines: Vec<String>) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "== {title} ==");
        if lines.is_empty() {
            let _ = writeln!(out, "  (empty)");
        }
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
    }
}

impl View for ConsoleView {
    fn render_inventory(&self, inventory: &[InventoryItem], staging: &StagingArea) {
        self.print("Inventory", inventory_lines(inventory, staging));
    }

    fn render_cart(&self, cart: &[CartItem]) {
        self.print("Cart", cart_lines(cart));
    }

    fn render_staged(&self, id: ItemId, quantity: u32) {
        let _ = writeln!(std::io::stdout(), "  #{id} staged: {quantity}");
    }
}
