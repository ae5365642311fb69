//! # Stock Commands
//!
//! Adding, deleting, searching and listing stock items.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Search Flow                                    │
//! │                                                                         │
//! │  > search lap                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Action::Search { query: "lap" }  ──► stored on PosState                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  > view                                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PosState::filtered() recomputed from inventory + query                 │
//! │  (name / id / category case-insensitive, price as typed)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Found 1 result(s)" + inventory table                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::Session;
use stockdesk_core::{Action, CartSummary, Category, Event, Money, StockDraft, StockItem};

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: Money,
    /// `quantity × price`
    pub value: Money,
    pub low_stock: bool,
}

impl InventoryRow {
    fn new(item: &StockItem, threshold: u32) -> Self {
        InventoryRow {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            price: item.price,
            value: item.line_value(),
            low_stock: item.is_low_stock(threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub query: String,
    pub rows: Vec<InventoryRow>,
    /// Only present while a search query is active.
    pub result_count: Option<usize>,
    /// Value of the whole inventory, independent of the query.
    pub total_value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFormResponse {
    pub next_id: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAddedResponse {
    pub message: String,
    pub item: StockItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRemovedResponse {
    pub item: StockItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub matches: usize,
}

/// Sell screen: what can still be put in the cart, and the cart itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableResponse {
    pub query: String,
    pub items: Vec<StockItem>,
    pub cart: CartSummary,
}

/// Inventory table, filtered by the active search query.
pub fn view_inventory(session: &Session) -> InventoryResponse {
    let pos = session.pos();
    let threshold = session.config().low_stock_threshold;

    let rows: Vec<InventoryRow> = pos
        .filtered()
        .into_iter()
        .map(|item| InventoryRow::new(item, threshold))
        .collect();

    debug!(rows = rows.len(), query = %pos.query(), "view_inventory");

    InventoryResponse {
        query: pos.query().to_string(),
        result_count: (!pos.query().is_empty()).then_some(rows.len()),
        rows,
        total_value: pos.inventory().total_value(),
    }
}

/// Items with stock left, filtered by the active search query.
pub fn available_stock(session: &Session) -> AvailableResponse {
    let pos = session.pos();
    AvailableResponse {
        query: pos.query().to_string(),
        items: pos.available().into_iter().cloned().collect(),
        cart: pos.cart_summary(),
    }
}

/// What the add-stock form needs: the ID that a blank `id=` will get and
/// the category choices.
pub fn add_form(session: &Session) -> Result<AddFormResponse, ApiError> {
    Ok(AddFormResponse {
        next_id: session.pos().inventory().next_stock_id()?,
        categories: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
    })
}

/// Validates the form and appends a new stock item.
pub fn add_stock(session: &mut Session, draft: StockDraft) -> Result<StockAddedResponse, ApiError> {
    debug!(name = %draft.name, id = %draft.id, "add_stock command");

    let item = match session.apply(Action::AddStock { draft })? {
        Event::StockAdded { item } => item,
        other => return Err(unexpected(&other)),
    };

    info!(id = %item.id, "Stock item added");
    Ok(StockAddedResponse {
        message: "Stock added successfully!".to_string(),
        item,
    })
}

/// Deletes a stock item that is not reserved in the cart.
pub fn delete_stock(session: &mut Session, id: String) -> Result<StockRemovedResponse, ApiError> {
    debug!(id = %id, "delete_stock command");

    match session.apply(Action::RemoveStock { id })? {
        Event::StockRemoved { item } => Ok(StockRemovedResponse { item }),
        other => Err(unexpected(&other)),
    }
}

/// Sets (or with an empty query, clears) the search query.
pub fn search(session: &mut Session, query: String) -> Result<SearchResponse, ApiError> {
    debug!(query = %query, "search command");

    match session.apply(Action::Search { query })? {
        Event::SearchChanged { query, matches } => Ok(SearchResponse { query, matches }),
        other => Err(unexpected(&other)),
    }
}

pub(crate) fn unexpected(event: &Event) -> ApiError {
    tracing::error!(?event, "Unexpected event for command");
    ApiError::internal("Unexpected response from the point-of-sale state")
}
