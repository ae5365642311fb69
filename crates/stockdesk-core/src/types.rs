//! # Domain Types
//!
//! Core domain types used throughout StockDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockItem     │   │    CartLine     │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id  (STK001)   │──►│  id  (ref)      │──►│  id  (millis)   │       │
//! │  │  name           │   │  name  (frozen) │   │  date           │       │
//! │  │  quantity       │   │  price (frozen) │   │  items (frozen) │       │
//! │  │  price          │   │  category       │   │  total          │       │
//! │  │  category       │   │  quantity       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Category     │   │    Section      │                             │
//! │  │  Electronics    │   │  Add            │                             │
//! │  │  Accessories …  │   │  View / Sell    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A cart line copies name, price and category from the stock item when it
//! is created. A bill copies the cart lines when the sale settles. Later
//! edits to the inventory never rewrite what was reserved or sold.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Stock Item
// =============================================================================

/// A single inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Unique identifier, `STK` + zero-padded number unless the operator chose one.
    pub id: String,

    /// Display name shown in the inventory table and on the invoice.
    pub name: String,

    /// Units currently available (reserved units are already subtracted).
    pub quantity: u32,

    /// Unit price.
    pub price: Money,

    /// Category label. Free text at this level; the add-stock form
    /// restricts new items to [`Category::ALL`].
    pub category: String,
}

impl StockItem {
    /// Value of everything on hand (`quantity × price`).
    #[inline]
    pub fn line_value(&self) -> Money {
        self.price * self.quantity
    }

    /// True when the quantity is below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }

    /// Case-insensitive substring match on name, id or category, and a
    /// plain substring match on the stringified price.
    ///
    /// `needle` must already be lowercased; `raw` is the query as typed.
    pub(crate) fn matches(&self, needle: &str, raw: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self.price.plain_string().contains(raw)
            || self.category.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Stock Draft
// =============================================================================

/// The add-stock form exactly as typed: every field is raw text.
///
/// Converted into a [`NewStockItem`] by
/// [`validate_stock_draft`](crate::validation::validate_stock_draft).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct StockDraft {
    pub name: String,
    /// Optional; a blank ID means "generate the next STK number".
    pub id: String,
    pub quantity: String,
    pub price: String,
    pub category: String,
}

/// A validated add-stock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockItem {
    pub id: Option<String>,
    pub name: String,
    pub quantity: u32,
    pub price: Money,
    pub category: Category,
}

// =============================================================================
// Cart Line
// =============================================================================

/// A reserved selection of a stock item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// ID of the stock item this line reserves from.
    pub id: String,
    /// Name at time of adding (frozen).
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub price: Money,
    /// Category at time of adding (frozen).
    pub category: String,
    /// Reserved quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line from a stock item, freezing its name, price and category.
    pub fn from_item(item: &StockItem, quantity: u32) -> Self {
        CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Bill
// =============================================================================

/// Immutable invoice snapshot of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Bill number: Unix timestamp of the sale in milliseconds.
    pub id: i64,

    /// Human-readable sale date.
    pub date: String,

    /// When the sale settled.
    #[ts(as = "String")]
    pub issued_at: DateTime<FixedOffset>,

    /// Cart lines at the moment of sale.
    pub items: Vec<CartLine>,

    /// Σ price × quantity over `items`.
    pub total: Money,
}

impl Bill {
    /// Builds a bill from the cart lines being settled.
    pub fn from_lines(items: Vec<CartLine>, at: DateTime<FixedOffset>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum();
        Bill {
            id: at.timestamp_millis(),
            date: at.format(BILL_DATE_FORMAT).to_string(),
            issued_at: at,
            items,
            total,
        }
    }
}

/// Day/month/year with a 24h clock, e.g. `19/10/2026, 14:03:07`.
pub const BILL_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

// =============================================================================
// Category
// =============================================================================

/// The categories offered by the add-stock form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Electronics,
    Accessories,
    Clothing,
    Books,
    Other,
}

impl Category {
    /// Every selectable category, in form order.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Accessories,
        Category::Clothing,
        Category::Books,
        Category::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Accessories => "Accessories",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; the canonical spelling is what gets stored.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Section
// =============================================================================

/// Which screen the operator is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Add,
    #[default]
    View,
    Sell,
}

impl FromStr for Section {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Section::Add),
            "view" => Ok(Section::View),
            "sell" => Ok(Section::Sell),
            _ => Err(ValidationError::NotAllowed {
                field: "section".to_string(),
                allowed: vec!["add".to_string(), "view".to_string(), "sell".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str, quantity: u32, price: i64) -> StockItem {
        StockItem {
            id: id.to_string(),
            name: "Keyboard".to_string(),
            quantity,
            price: Money::from_major(price),
            category: "Accessories".to_string(),
        }
    }

    #[test]
    fn test_line_value_and_low_stock() {
        let keyboard = item("STK003", 4, 1200);
        assert_eq!(keyboard.line_value(), Money::from_major(4800));
        assert!(keyboard.is_low_stock(5));
        assert!(!item("STK003", 5, 1200).is_low_stock(5));
    }

    #[test]
    fn test_cart_line_freezes_item_fields() {
        let mut keyboard = item("STK003", 15, 1200);
        let line = CartLine::from_item(&keyboard, 2);
        keyboard.price = Money::from_major(1);

        assert_eq!(line.price, Money::from_major(1200));
        assert_eq!(line.line_total(), Money::from_major(2400));
    }

    #[test]
    fn test_bill_from_lines() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 14, 3, 7)
            .unwrap();
        let lines = vec![
            CartLine::from_item(&item("STK002", 25, 500), 2),
            CartLine::from_item(&item("STK003", 15, 1200), 1),
        ];

        let bill = Bill::from_lines(lines, at);
        assert_eq!(bill.total, Money::from_major(2200));
        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.id, at.timestamp_millis());
        assert_eq!(bill.date, "19/10/2026, 14:03:07");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("books".parse::<Category>().unwrap(), Category::Books);
        assert_eq!(" ELECTRONICS ".parse::<Category>().unwrap(), Category::Electronics);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_section_default_and_parse() {
        assert_eq!(Section::default(), Section::View);
        assert_eq!("Sell".parse::<Section>().unwrap(), Section::Sell);
        assert!("checkout".parse::<Section>().is_err());
    }
}
