//! # Cart Commands
//!
//! Reserving stock into the cart and adjusting it.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│  Sold    │                        │
//! │  │  Cart    │     │          │     │ (±bill)  │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                                               │
//! │       │           cart add / + / -                                     │
//! │       │           cart rm                                              │
//! │       │                │                                               │
//! │       └─── cart clear ─┘  (every reserved unit goes back to stock)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::commands::product::unexpected;
use crate::error::ApiError;
use crate::state::Session;
use stockdesk_core::{Action, CartSummary, Event, Step};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: CartSummary,
    /// Set when the command was accepted but changed nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCartResponse {
    /// Units returned to the inventory.
    pub released: u32,
}

/// Gets the current cart contents.
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    CartResponse {
        cart: session.pos().cart_summary(),
        notice: None,
    }
}

/// Reserves `quantity` units of a stock item.
///
/// ## Behavior
/// - If the item is already in the cart: its line grows
/// - Otherwise: a new line with the current price
/// - The units leave the inventory immediately
pub fn add_to_cart(session: &mut Session, id: String, quantity: u32) -> Result<CartResponse, ApiError> {
    debug!(id = %id, quantity, "add_to_cart command");
    let event = session.apply(Action::AddToCart { id, quantity })?;
    cart_response(session, event)
}

/// Moves one unit from the inventory into an existing line.
pub fn increment(session: &mut Session, id: String) -> Result<CartResponse, ApiError> {
    debug!(id = %id, "increment command");
    let event = session.apply(Action::StepCartQuantity {
        id,
        step: Step::Increment,
    })?;
    cart_response(session, event)
}

/// Moves one unit from a line back to the inventory. A line never drops
/// below 1 this way.
pub fn decrement(session: &mut Session, id: String) -> Result<CartResponse, ApiError> {
    debug!(id = %id, "decrement command");
    let event = session.apply(Action::StepCartQuantity {
        id,
        step: Step::Decrement,
    })?;
    cart_response(session, event)
}

/// Drops a line and returns its units to the inventory.
pub fn remove_from_cart(session: &mut Session, id: String) -> Result<CartResponse, ApiError> {
    debug!(id = %id, "remove_from_cart command");
    let event = session.apply(Action::RemoveFromCart { id })?;
    cart_response(session, event)
}

/// Empties the cart.
pub fn clear_cart(session: &mut Session) -> Result<ClearCartResponse, ApiError> {
    debug!("clear_cart command");
    match session.apply(Action::ClearCart)? {
        Event::CartCleared { released } => Ok(ClearCartResponse { released }),
        other => Err(unexpected(&other)),
    }
}

fn cart_response(session: &Session, event: Event) -> Result<CartResponse, ApiError> {
    match event {
        Event::CartChanged { cart } => Ok(CartResponse { cart, notice: None }),
        Event::QuantityUnchanged { id, quantity } => Ok(CartResponse {
            cart: session.pos().cart_summary(),
            notice: Some(format!(
                "{} is at quantity {}. Use `cart rm {}` to remove it.",
                id, quantity, id
            )),
        }),
        other => Err(unexpected(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use stockdesk_core::Money;

    fn session() -> Session {
        Session::new(ConfigState::default())
    }

    fn stock_of(session: &Session, id: &str) -> u32 {
        session.pos().inventory().get(id).map_or(0, |i| i.quantity)
    }

    #[test]
    fn test_add_and_step() {
        let mut session = session();
        let response = add_to_cart(&mut session, "STK002".to_string(), 2).unwrap();
        assert_eq!(response.cart.total, Money::from_major(1_000));
        assert_eq!(stock_of(&session, "STK002"), 23);

        let response = increment(&mut session, "STK002".to_string()).unwrap();
        assert_eq!(response.cart.total_quantity, 3);
        assert_eq!(stock_of(&session, "STK002"), 22);

        decrement(&mut session, "STK002".to_string()).unwrap();
        let response = decrement(&mut session, "STK002".to_string()).unwrap();
        assert_eq!(response.cart.total_quantity, 1);
        assert!(response.notice.is_none());

        let response = decrement(&mut session, "STK002".to_string()).unwrap();
        assert_eq!(response.cart.total_quantity, 1);
        assert!(response.notice.is_some());
        assert_eq!(stock_of(&session, "STK002"), 24);
    }

    #[test]
    fn test_insufficient_stock() {
        let mut session = session();
        let err = add_to_cart(&mut session, "STK001".to_string(), 11).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(get_cart(&session).cart.lines.is_empty());
        assert_eq!(stock_of(&session, "STK001"), 10);
    }

    #[test]
    fn test_increment_when_sold_out() {
        let mut session = session();
        add_to_cart(&mut session, "STK001".to_string(), 10).unwrap();
        let err = increment(&mut session, "STK001".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.starts_with("No more stock available!"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut session = session();
        add_to_cart(&mut session, "STK001".to_string(), 1).unwrap();
        add_to_cart(&mut session, "STK003".to_string(), 4).unwrap();

        let response = remove_from_cart(&mut session, "STK001".to_string()).unwrap();
        assert_eq!(response.cart.item_count, 1);
        assert_eq!(stock_of(&session, "STK001"), 10);

        let err = remove_from_cart(&mut session, "STK001".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert_eq!(clear_cart(&mut session).unwrap().released, 4);
        assert_eq!(stock_of(&session, "STK003"), 15);
    }
}
