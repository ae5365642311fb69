//! # Point-of-Sale State Machine
//!
//! One explicit state value, one list of actions, one transition function.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PosState Transitions                                 │
//! │                                                                         │
//! │  Action                    Inventory               Cart                 │
//! │  ──────                    ─────────               ────                 │
//! │  AddStock          ──────► push item                                    │
//! │  RemoveStock       ──────► remove item (if not reserved)                │
//! │  AddToCart(id, n)  ──────► qty -= n        ──────► line += n            │
//! │  StepCartQuantity  ──────► qty ∓= 1        ──────► line ±= 1 (min 1)    │
//! │  RemoveFromCart    ──────► qty += line     ──────► drop line            │
//! │  ClearCart         ──────► qty += lines    ──────► empty                │
//! │  Sell              ──────► (untouched)     ──────► empty, maybe Bill    │
//! │                                                                         │
//! │  Reservation: stock leaves the inventory the moment it enters the cart │
//! │  and comes back only when the line is removed. Settling a sale does    │
//! │  not subtract it a second time.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every action either validates and applies completely, or fails before
//! touching anything.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cart::{Cart, CartSummary};
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::{Bill, Section, StockDraft, StockItem};
use crate::validation::{validate_cart_quantity, validate_search_query, validate_stock_draft};

// =============================================================================
// Actions & Events
// =============================================================================

/// Direction of the cart quantity stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Increment,
    Decrement,
}

/// Everything an operator can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Navigate { section: Section },
    AddStock { draft: StockDraft },
    RemoveStock { id: String },
    Search { query: String },
    AddToCart { id: String, quantity: u32 },
    StepCartQuantity { id: String, step: Step },
    RemoveFromCart { id: String },
    ClearCart,
    /// Settle the cart. `at` becomes the bill number and date.
    Sell { with_bill: bool, at: DateTime<FixedOffset> },
    CloseBill,
}

/// What an accepted action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Navigated { section: Section },
    StockAdded { item: StockItem },
    StockRemoved { item: StockItem },
    SearchChanged { query: String, matches: usize },
    CartChanged { cart: CartSummary },
    /// The stepper would have dropped the line below 1.
    QuantityUnchanged { id: String, quantity: u32 },
    CartCleared { released: u32 },
    SaleCompleted {
        bill: Option<Bill>,
        lines: usize,
        total: Money,
    },
    BillClosed { was_open: bool },
}

// =============================================================================
// PosState
// =============================================================================

/// Complete application state of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosState {
    inventory: Inventory,
    cart: Cart,
    /// The single bill slot (most recent billed sale until closed).
    bill: Option<Bill>,
    section: Section,
    query: String,
}

impl PosState {
    /// Empty inventory, empty cart.
    pub fn new() -> Self {
        PosState::default()
    }

    /// Starts from an existing inventory.
    pub fn with_inventory(inventory: Inventory) -> Self {
        PosState {
            inventory,
            ..PosState::default()
        }
    }

    /// Starts from the seed inventory.
    pub fn seeded() -> Self {
        PosState::with_inventory(Inventory::seeded())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Inventory filtered by the current search query.
    pub fn filtered(&self) -> Vec<&StockItem> {
        self.inventory.search(&self.query)
    }

    /// Sellable items filtered by the current search query.
    pub fn available(&self) -> Vec<&StockItem> {
        self.inventory.available_for_sale(&self.query)
    }

    pub fn cart_summary(&self) -> CartSummary {
        CartSummary::from(&self.cart)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Applies one action in place.
    pub fn apply(&mut self, action: Action) -> CoreResult<Event> {
        debug!(?action, "Applying action");

        let result = match action {
            Action::Navigate { section } => Ok(self.navigate(section)),
            Action::AddStock { draft } => self.add_stock(&draft),
            Action::RemoveStock { id } => self.remove_stock(&id),
            Action::Search { query } => self.search(&query),
            Action::AddToCart { id, quantity } => self.add_to_cart(&id, quantity),
            Action::StepCartQuantity { id, step } => self.step_cart_quantity(&id, step),
            Action::RemoveFromCart { id } => self.remove_from_cart(&id),
            Action::ClearCart => Ok(self.clear_cart()),
            Action::Sell { with_bill, at } => self.process_sale(with_bill, at),
            Action::CloseBill => Ok(self.close_bill()),
        };

        if let Err(ref e) = result {
            warn!(error = %e, "Action rejected");
        }
        result
    }

    // -------------------------------------------------------------------------
    // Navigation & search
    // -------------------------------------------------------------------------

    pub fn navigate(&mut self, section: Section) -> Event {
        self.section = section;
        Event::Navigated { section }
    }

    /// Stores the query; the filtered view is recomputed from it on demand.
    pub fn search(&mut self, query: &str) -> CoreResult<Event> {
        let query = validate_search_query(query)?;
        let matches = self.inventory.search(&query).len();
        self.query = query.clone();
        Ok(Event::SearchChanged { query, matches })
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Validates the add-stock form and appends the item.
    pub fn add_stock(&mut self, draft: &StockDraft) -> CoreResult<Event> {
        let new_item = validate_stock_draft(draft)?;
        let item = self.inventory.add_item(new_item)?.clone();
        info!(id = %item.id, name = %item.name, "Stock added");
        Ok(Event::StockAdded { item })
    }

    /// Deletes a stock item that has nothing reserved in the cart.
    pub fn remove_stock(&mut self, id: &str) -> CoreResult<Event> {
        self.inventory.require(id)?;

        let reserved = self.cart.reserved_quantity(id);
        if reserved > 0 {
            return Err(CoreError::StockReserved {
                id: id.to_string(),
                reserved,
            });
        }

        let item = self.inventory.remove_item(id)?;
        info!(id = %item.id, "Stock removed");
        Ok(Event::StockRemoved { item })
    }

    // -------------------------------------------------------------------------
    // Cart / reservation
    // -------------------------------------------------------------------------

    /// Reserves `quantity` units of `id` into the cart.
    pub fn add_to_cart(&mut self, id: &str, quantity: u32) -> CoreResult<Event> {
        validate_cart_quantity(quantity)?;

        let item = self
            .inventory
            .get_mut(id)
            .ok_or_else(|| CoreError::StockItemNotFound(id.to_string()))?;

        if quantity > item.quantity {
            return Err(CoreError::InsufficientStock {
                id: id.to_string(),
                available: item.quantity,
                requested: quantity,
            });
        }

        item.quantity -= quantity;
        self.cart.add(item, quantity);

        debug!(id = %id, quantity, remaining = item.quantity, "Reserved into cart");
        Ok(self.cart_changed())
    }

    /// Moves one unit between the inventory and an existing cart line.
    ///
    /// ## Rules
    /// - Decrement on a line of 1 is a no-op (use `remove_from_cart`)
    /// - Increment with nothing left in stock fails with `NoStockAvailable`
    pub fn step_cart_quantity(&mut self, id: &str, step: Step) -> CoreResult<Event> {
        let line = self
            .cart
            .get_mut(id)
            .ok_or_else(|| CoreError::CartLineNotFound(id.to_string()))?;

        match step {
            Step::Decrement => {
                if line.quantity <= 1 {
                    return Ok(Event::QuantityUnchanged {
                        id: id.to_string(),
                        quantity: line.quantity,
                    });
                }
                line.quantity -= 1;
                if let Some(item) = self.inventory.get_mut(id) {
                    item.quantity += 1;
                }
            }
            Step::Increment => {
                let item = self
                    .inventory
                    .get_mut(id)
                    .ok_or_else(|| CoreError::StockItemNotFound(id.to_string()))?;
                if item.quantity == 0 {
                    return Err(CoreError::NoStockAvailable(id.to_string()));
                }
                item.quantity -= 1;
                line.quantity += 1;
            }
        }

        Ok(self.cart_changed())
    }

    /// Drops a cart line and returns its units to the inventory.
    ///
    /// If the stock item has disappeared the line is still dropped.
    pub fn remove_from_cart(&mut self, id: &str) -> CoreResult<Event> {
        let line = self
            .cart
            .remove(id)
            .ok_or_else(|| CoreError::CartLineNotFound(id.to_string()))?;

        self.release(&line.id, line.quantity);
        Ok(self.cart_changed())
    }

    /// Releases every line back to the inventory.
    pub fn clear_cart(&mut self) -> Event {
        let mut released: u32 = 0;
        for line in self.cart.take() {
            self.release(&line.id, line.quantity);
            released = released.saturating_add(line.quantity);
        }
        Event::CartCleared { released }
    }

    // -------------------------------------------------------------------------
    // Settlement
    // -------------------------------------------------------------------------

    /// Completes the sale of everything in the cart.
    ///
    /// Inventory is left as is: the units already left it when they were
    /// reserved. With `with_bill` the bill slot is replaced by a snapshot of
    /// the settled lines. The cart is empty afterwards either way.
    pub fn process_sale(&mut self, with_bill: bool, at: DateTime<FixedOffset>) -> CoreResult<Event> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = self.cart.total();
        let settled = self.cart.take();
        let lines = settled.len();

        let bill = with_bill.then(|| Bill::from_lines(settled, at));
        if let Some(ref bill) = bill {
            self.bill = Some(bill.clone());
        }

        info!(lines, total = %total, with_bill, "Sale completed");
        Ok(Event::SaleCompleted { bill, lines, total })
    }

    /// Discards the displayed bill.
    pub fn close_bill(&mut self) -> Event {
        Event::BillClosed {
            was_open: self.bill.take().is_some(),
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn release(&mut self, id: &str, quantity: u32) {
        match self.inventory.get_mut(id) {
            Some(item) => item.quantity += quantity,
            None => debug!(id = %id, quantity, "Released stock item no longer exists"),
        }
    }

    fn cart_changed(&self) -> Event {
        Event::CartChanged {
            cart: self.cart_summary(),
        }
    }
}

/// Pure transition: returns the next state and leaves `state` untouched.
///
/// ```rust
/// use stockdesk_core::state::{reduce, Action, PosState};
///
/// let before = PosState::seeded();
/// let (after, _) = reduce(&before, Action::AddToCart { id: "STK002".into(), quantity: 2 }).unwrap();
///
/// assert_eq!(before.inventory().get("STK002").unwrap().quantity, 25);
/// assert_eq!(after.inventory().get("STK002").unwrap().quantity, 23);
/// ```
pub fn reduce(state: &PosState, action: Action) -> CoreResult<(PosState, Event)> {
    let mut next = state.clone();
    let event = next.apply(action)?;
    Ok((next, event))
}

// =============================================================================
// Unit Tests
// =============================================================================
