//! # Cart
//!
//! Ordered collection of reserved cart lines.
//!
//! The cart on its own knows nothing about inventory. Moving units between
//! the two (reservation and release) is done by
//! [`PosState`](crate::state::PosState), which owns both and keeps them in
//! step.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, StockItem};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by stock item `id` (adding again grows the line)
/// - Every line quantity is at least 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Units of `id` currently reserved (0 when not in the cart).
    pub fn reserved_quantity(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |line| line.quantity)
    }

    /// Grows the existing line for `item` or appends a new snapshot line.
    pub(crate) fn add(&mut self, item: &StockItem, quantity: u32) {
        match self.get_mut(&item.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine::from_item(item, quantity)),
        }
    }

    /// Deletes the line for `id` and returns it.
    pub(crate) fn remove(&mut self, id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Empties the cart and hands back every line.
    pub(crate) fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Running total, Σ price × quantity.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for front-end responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub total: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            lines: cart.lines.clone(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}
