//! # Inventory Store
//!
//! Ordered collection of stock items keyed by unique ID, plus the read-only
//! search projection over it.
//!
//! ## ID Generation
//! ```text
//! existing: STK001, STK002, SKU-9, STK007
//!              │       │      ╳       │
//!              1       2   ignored    7
//!                         max = 7 ──► next = STK008
//! ```
//! IDs that are not `STK<digits>` never take part in numbering, so a
//! free-form ID cannot break generation for everyone else.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{NewStockItem, StockItem};

/// Prefix of generated stock IDs.
pub const STOCK_ID_PREFIX: &str = "STK";

/// Zero-padding width of generated stock numbers (`STK001`).
const STOCK_ID_WIDTH: usize = 3;

/// The inventory a fresh session starts with.
pub fn seed_items() -> Vec<StockItem> {
    vec![
        StockItem {
            id: "STK001".to_string(),
            name: "Laptop".to_string(),
            quantity: 10,
            price: Money::from_major(50_000),
            category: "Electronic".to_string(),
        },
        StockItem {
            id: "STK002".to_string(),
            name: "Mouse".to_string(),
            quantity: 25,
            price: Money::from_major(500),
            category: "Accessories".to_string(),
        },
        StockItem {
            id: "STK003".to_string(),
            name: "Keyboard".to_string(),
            quantity: 15,
            price: Money::from_major(1200),
            category: "Accessories".to_string(),
        },
    ]
}

// =============================================================================
// Inventory
// =============================================================================

/// The inventory store.
///
/// ## Invariants
/// - IDs are unique
/// - Items keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<StockItem>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory { items: Vec::new() }
    }

    /// Creates an inventory holding [`seed_items`].
    pub fn seeded() -> Self {
        Inventory { items: seed_items() }
    }

    /// Creates an inventory from existing items, rejecting duplicate IDs.
    pub fn with_items(items: Vec<StockItem>) -> CoreResult<Self> {
        let mut inventory = Inventory::new();
        for item in items {
            inventory.ensure_unique(&item.id)?;
            inventory.items.push(item);
        }
        Ok(inventory)
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StockItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut StockItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Looks up an item or fails with [`CoreError::StockItemNotFound`].
    pub fn require(&self, id: &str) -> CoreResult<&StockItem> {
        self.get(id)
            .ok_or_else(|| CoreError::StockItemNotFound(id.to_string()))
    }

    /// Returns the next generated ID: highest `STK<n>` plus one, padded to 3 digits.
    ///
    /// Fails with [`CoreError::StockIdsExhausted`] once an item holds
    /// `STK4294967295`, the largest number there is.
    ///
    /// ```rust
    /// use stockdesk_core::inventory::Inventory;
    ///
    /// assert_eq!(Inventory::new().next_stock_id().unwrap(), "STK001");
    /// assert_eq!(Inventory::seeded().next_stock_id().unwrap(), "STK004");
    /// ```
    pub fn next_stock_id(&self) -> CoreResult<String> {
        let max = self
            .items
            .iter()
            .filter_map(|item| stock_number(&item.id))
            .max()
            .unwrap_or(0);
        let next = max.checked_add(1).ok_or(CoreError::StockIdsExhausted)?;
        Ok(format!(
            "{}{:0width$}",
            STOCK_ID_PREFIX,
            next,
            width = STOCK_ID_WIDTH
        ))
    }

    /// Appends a validated item and returns it.
    ///
    /// Uses the caller's ID when given (rejecting duplicates), otherwise
    /// generates one with [`next_stock_id`](Self::next_stock_id).
    pub fn add_item(&mut self, new_item: NewStockItem) -> CoreResult<&StockItem> {
        let id = match new_item.id {
            Some(id) => {
                self.ensure_unique(&id)?;
                id
            }
            None => self.next_stock_id()?,
        };

        debug!(id = %id, name = %new_item.name, quantity = new_item.quantity, "Adding stock item");

        self.items.push(StockItem {
            id,
            name: new_item.name,
            quantity: new_item.quantity,
            price: new_item.price,
            category: new_item.category.as_str().to_string(),
        });

        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Removes an item by ID and returns it.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<StockItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CoreError::StockItemNotFound(id.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Search projection over this inventory; see [`filter`].
    pub fn search(&self, query: &str) -> Vec<&StockItem> {
        filter(&self.items, query)
    }

    /// Search projection restricted to items that can still be sold.
    pub fn available_for_sale(&self, query: &str) -> Vec<&StockItem> {
        self.search(query)
            .into_iter()
            .filter(|item| item.quantity > 0)
            .collect()
    }

    /// Total value of everything on hand.
    pub fn total_value(&self) -> Money {
        self.items.iter().map(StockItem::line_value).sum()
    }

    fn ensure_unique(&self, id: &str) -> CoreResult<()> {
        if self.get(id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

// =============================================================================
// Projections
// =============================================================================

/// Case-insensitive search over name, ID, price and category.
///
/// - A blank (empty or whitespace-only) query returns every item.
/// - Matches keep their relative order.
/// - Nothing is mutated or cached; call again whenever the inputs change.
pub fn filter<'a>(items: &'a [StockItem], query: &str) -> Vec<&'a StockItem> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches(&needle, query))
        .collect()
}

/// Numeric suffix of a generated ID (`STK042` → 42). `None` for anything else.
pub fn stock_number(id: &str) -> Option<u32> {
    let digits = id.strip_prefix(STOCK_ID_PREFIX)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn new_item(id: Option<&str>, name: &str) -> NewStockItem {
        NewStockItem {
            id: id.map(str::to_string),
            name: name.to_string(),
            quantity: 4,
            price: Money::from_major(250),
            category: Category::Books,
        }
    }

    #[test]
    fn test_next_id_follows_highest_number() {
        let mut inventory = Inventory::seeded();
        let added = inventory.add_item(new_item(None, "Novel")).unwrap();
        assert_eq!(added.id, "STK004");
        assert_eq!(added.category, "Books");
        assert_eq!(inventory.next_stock_id().unwrap(), "STK005");
    }

    #[test]
    fn test_next_id_sequence_for_any_n() {
        for n in 1..=12u32 {
            let items = (1..=n)
                .map(|i| StockItem {
                    id: format!("STK{i:03}"),
                    name: format!("Item {i}"),
                    quantity: 1,
                    price: Money::zero(),
                    category: "Other".to_string(),
                })
                .collect();
            let inventory = Inventory::with_items(items).unwrap();
            assert_eq!(inventory.next_stock_id().unwrap(), format!("STK{:03}", n + 1));
        }
    }

    #[test]
    fn test_next_id_ignores_free_form_ids() {
        let mut inventory = Inventory::new();
        inventory.add_item(new_item(Some("SKU-9"), "Atlas")).unwrap();
        inventory.add_item(new_item(Some("STKabc"), "Globe")).unwrap();
        assert_eq!(inventory.next_stock_id().unwrap(), "STK001");

        inventory.add_item(new_item(Some("STK041"), "Map")).unwrap();
        assert_eq!(inventory.next_stock_id().unwrap(), "STK042");
    }

    #[test]
    fn test_next_id_at_the_top_of_the_range() {
        let mut inventory = Inventory::new();
        inventory.add_item(new_item(Some("STK4294967294"), "Penultimate")).unwrap();
        assert_eq!(inventory.next_stock_id().unwrap(), "STK4294967295");

        inventory.add_item(new_item(Some("STK4294967295"), "Last")).unwrap();
        assert_eq!(inventory.next_stock_id(), Err(CoreError::StockIdsExhausted));

        // Generation fails cleanly; caller-supplied IDs still work.
        let before = inventory.clone();
        assert_eq!(
            inventory.add_item(new_item(None, "Overflow")).unwrap_err(),
            CoreError::StockIdsExhausted
        );
        assert_eq!(inventory, before);
        inventory.add_item(new_item(Some("SKU-1"), "Manual")).unwrap();
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut inventory = Inventory::seeded();
        let before = inventory.clone();

        let err = inventory.add_item(new_item(Some("STK002"), "Another mouse")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(inventory, before);

        let dupes = vec![seed_items()[0].clone(), seed_items()[0].clone()];
        assert!(Inventory::with_items(dupes).is_err());
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let inventory = Inventory::seeded();

        let hits: Vec<_> = inventory.search("LAP").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(hits, ["STK001"]);

        let hits: Vec<_> = inventory.search("access").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(hits, ["STK002", "STK003"]);

        let hits: Vec<_> = inventory.search("stk00").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(hits, ["STK001", "STK002", "STK003"]);
    }

    #[test]
    fn test_search_matches_price_text() {
        let inventory = Inventory::seeded();
        let hits: Vec<_> = inventory.search("500").iter().map(|i| i.id.as_str()).collect();
        // 50000 and 500 both contain "500"
        assert_eq!(hits, ["STK001", "STK002"]);
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let inventory = Inventory::seeded();
        assert_eq!(inventory.search("").len(), 3);
        assert_eq!(inventory.search("   ").len(), 3);
        assert!(inventory.search("tablet").is_empty());
    }

    #[test]
    fn test_available_for_sale_hides_empty_items() {
        let mut items = seed_items();
        items[1].quantity = 0;
        let inventory = Inventory::with_items(items).unwrap();

        let ids: Vec<_> = inventory.available_for_sale("").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["STK001", "STK003"]);
    }

    #[test]
    fn test_remove_item() {
        let mut inventory = Inventory::seeded();
        let removed = inventory.remove_item("STK002").unwrap();
        assert_eq!(removed.name, "Mouse");
        assert_eq!(inventory.len(), 2);
        assert_eq!(
            inventory.remove_item("STK002"),
            Err(CoreError::StockItemNotFound("STK002".to_string()))
        );
    }

    #[test]
    fn test_total_value() {
        // 10×50000 + 25×500 + 15×1200
        assert_eq!(Inventory::seeded().total_value(), Money::from_major(530_500));
    }

    #[test]
    fn test_stock_number() {
        assert_eq!(stock_number("STK007"), Some(7));
        assert_eq!(stock_number("STK"), None);
        assert_eq!(stock_number("STK-1"), None);
        assert_eq!(stock_number("stk001"), None);
    }
}
