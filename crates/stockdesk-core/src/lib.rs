//! # stockdesk-core: Pure Business Logic for StockDesk
//!
//! Inventory, cart reservation, sale settlement and invoices as plain data
//! and deterministic functions. No I/O of any kind.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (terminal, or any other)              │   │
//! │  │    add / view / sell screens, invoice print & close             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │   cart    │  │   state   │  │  invoice  │  │   │
//! │  │   │ StockItem │  │ CartLine  │  │ PosState  │  │ text/html │  │   │
//! │  │   │  search   │  │  totals   │  │  Action   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBALS • DETERMINISTIC                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Event / CoreError                      │
//! │                                ▼                                        │
//! │                          front end renders                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StockItem, CartLine, Bill, Category, Section)
//! - [`money`] - Integer money and currency formatting
//! - [`inventory`] - Inventory store, ID generation, search projection
//! - [`cart`] - Cart lines and totals
//! - [`state`] - The `PosState` controller and its actions
//! - [`invoice`] - Text and HTML invoice rendering
//! - [`validation`] - Boundary parsing of operator input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use stockdesk_core::{Action, Money, PosState};
//!
//! let mut state = PosState::seeded();
//! state.apply(Action::AddToCart { id: "STK002".into(), quantity: 2 }).unwrap();
//! state.apply(Action::AddToCart { id: "STK003".into(), quantity: 1 }).unwrap();
//!
//! let at = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
//! state.apply(Action::Sell { with_bill: true, at }).unwrap();
//!
//! assert!(state.cart().is_empty());
//! assert_eq!(state.bill().unwrap().total, Money::from_major(2200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod invoice;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::{Currency, Money};
pub use state::{reduce, Action, Event, PosState, Step};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Items with fewer units than this are flagged as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;
