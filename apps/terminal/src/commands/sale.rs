//! # Sale Commands
//!
//! Settling the cart and handling the invoice.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Flow                                       │
//! │                                                                         │
//! │  > sell bill                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Action::Sell { with_bill: true, at: now }                              │
//! │       │                                                                 │
//! │       ├──► cart emptied (stock already left on reservation)             │
//! │       └──► bill slot = snapshot of the settled lines                    │
//! │                                                                         │
//! │  > bill print   ──► <invoice dir>/invoice-<bill id>.html                │
//! │  > bill close   ──► bill slot emptied                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::commands::product::unexpected;
use crate::error::{ApiError, ErrorCode};
use crate::state::Session;
use stockdesk_core::invoice::render_html;
use stockdesk_core::{Action, Bill, Event, Money};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub message: String,
    pub bill: Option<Bill>,
    pub lines: usize,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintBillResponse {
    pub bill_id: i64,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseBillResponse {
    pub was_open: bool,
}

/// Completes the sale of everything in the cart.
///
/// ## Arguments
/// * `with_bill` - Keep a bill for display and printing
/// * `at` - Wall-clock time of the sale (bill number and date)
pub fn sell(
    session: &mut Session,
    with_bill: bool,
    at: DateTime<FixedOffset>,
) -> Result<SaleResponse, ApiError> {
    debug!(with_bill, "sell command");

    match session.apply(Action::Sell { with_bill, at })? {
        Event::SaleCompleted { bill, lines, total } => {
            let message = if bill.is_some() {
                "Sale completed! Bill generated."
            } else {
                "Sale completed without bill."
            };
            Ok(SaleResponse {
                message: message.to_string(),
                bill,
                lines,
                total,
            })
        }
        other => Err(unexpected(&other)),
    }
}

/// The bill currently on display.
pub fn show_bill(session: &Session) -> Result<Bill, ApiError> {
    debug!("show_bill command");
    session.pos().bill().cloned().ok_or_else(no_bill)
}

/// Writes the displayed bill as an HTML invoice.
///
/// ## Output
/// `<invoice dir>/invoice-<bill id>.html`, overwritten if it already exists.
pub fn print_bill(session: &Session) -> Result<PrintBillResponse, ApiError> {
    debug!("print_bill command");

    let bill = session.pos().bill().ok_or_else(no_bill)?;
    let config = session.config();

    let html = render_html(bill, &config.store_name, &config.currency());
    let path = config.invoice_dir.join(format!("invoice-{}.html", bill.id));

    fs::create_dir_all(&config.invoice_dir)
        .and_then(|_| fs::write(&path, html))
        .map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to write invoice");
            ApiError::internal(format!("Could not write invoice to {}: {}", path.display(), e))
        })?;

    info!(bill_id = bill.id, path = %path.display(), "Invoice printed");
    Ok(PrintBillResponse {
        bill_id: bill.id,
        path,
    })
}

/// Discards the displayed bill.
pub fn close_bill(session: &mut Session) -> Result<CloseBillResponse, ApiError> {
    debug!("close_bill command");
    match session.apply(Action::CloseBill)? {
        Event::BillClosed { was_open } => Ok(CloseBillResponse { was_open }),
        other => Err(unexpected(&other)),
    }
}

fn no_bill() -> ApiError {
    ApiError::new(
        ErrorCode::NotFound,
        "No bill to show. Complete a sale with `sell bill` first.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use chrono::TimeZone;

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 18, 30, 0)
            .unwrap()
    }

    fn session_with_cart(config: ConfigState) -> Session {
        let mut session = Session::new(config);
        session
            .apply(Action::AddToCart {
                id: "STK002".to_string(),
                quantity: 2,
            })
            .unwrap();
        session
            .apply(Action::AddToCart {
                id: "STK003".to_string(),
                quantity: 1,
            })
            .unwrap();
        session
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stockdesk-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_sell_with_bill() {
        let mut session = session_with_cart(ConfigState::default());
        let response = sell(&mut session, true, at()).unwrap();

        assert_eq!(response.message, "Sale completed! Bill generated.");
        assert_eq!(response.lines, 2);
        assert_eq!(response.total, Money::from_major(2_200));
        assert!(session.pos().cart().is_empty());

        let bill = show_bill(&session).unwrap();
        assert_eq!(Some(bill), response.bill);
    }

    #[test]
    fn test_sell_without_bill() {
        let mut session = session_with_cart(ConfigState::default());
        let response = sell(&mut session, false, at()).unwrap();

        assert_eq!(response.message, "Sale completed without bill.");
        assert!(response.bill.is_none());
        assert_eq!(show_bill(&session).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_sell_empty_cart() {
        let mut session = Session::new(ConfigState::default());
        let err = sell(&mut session, true, at()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Cart is empty!");
    }

    #[test]
    fn test_print_and_close_bill() {
        let dir = scratch_dir("print");
        let config = ConfigState {
            invoice_dir: dir.clone(),
            store_name: "Corner Shop".to_string(),
            ..ConfigState::default()
        };
        let mut session = session_with_cart(config);
        sell(&mut session, true, at()).unwrap();

        let printed = print_bill(&session).unwrap();
        assert_eq!(printed.bill_id, at().timestamp_millis());
        assert_eq!(
            printed.path,
            dir.join(format!("invoice-{}.html", at().timestamp_millis()))
        );

        let html = fs::read_to_string(&printed.path).unwrap();
        assert!(html.contains("<p>Corner Shop</p>"));
        assert!(html.contains("Grand Total: ₹2,200"));

        assert!(close_bill(&mut session).unwrap().was_open);
        assert!(!close_bill(&mut session).unwrap().was_open);
        assert!(print_bill(&session).is_err());

        let _ = fs::remove_dir_all(dir);
    }
}
