//! # Commands Module
//!
//! Every command the operator can type.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch + Reply)
//! ├── parser.rs   ◄─── Input line → Command
//! ├── product.rs  ◄─── Stock add / delete / search / listing
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── sale.rs     ◄─── Selling, invoice show / print / close
//! └── config.rs   ◄─── Configuration and state export
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  > cart add STK002 2                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  parse_command ──► Command::Cart(CartCommand::Add { .. })               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute ──► cart::add_to_cart(session, id, quantity)                   │
//! │         │        -> Result<CartResponse, ApiError>                      │
//! │         ▼                                                               │
//! │  Reply::Cart(..) ──► text table, or one JSON line with --json           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers take only what they need: read-only views borrow `&Session`,
//! anything that applies an action takes `&mut Session`.

pub mod cart;
pub mod config;
pub mod parser;
pub mod product;
pub mod sale;

pub use parser::{parse_command, BillCommand, CartCommand, Command};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use stockdesk_core::{Action, Bill, PosState, Section};

use crate::error::ApiError;
use crate::state::{ConfigState, Session};

/// Successful outcome of one command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    AddForm(product::AddFormResponse),
    Inventory(product::InventoryResponse),
    Available(product::AvailableResponse),
    StockAdded(product::StockAddedResponse),
    StockRemoved(product::StockRemovedResponse),
    Search(product::SearchResponse),
    Cart(cart::CartResponse),
    CartCleared(cart::ClearCartResponse),
    Sale(sale::SaleResponse),
    Bill(Bill),
    BillPrinted(sale::PrintBillResponse),
    BillClosed(sale::CloseBillResponse),
    Config(ConfigState),
    Export(PosState),
    Help,
    Quit,
}

/// Runs one command against the session.
///
/// `now` is only read by `sell`.
pub fn execute(
    session: &mut Session,
    command: Command,
    now: DateTime<FixedOffset>,
) -> Result<Reply, ApiError> {
    let reply = match command {
        Command::Navigate(section) => navigate(session, section)?,
        Command::AddStock(draft) => Reply::StockAdded(product::add_stock(session, draft)?),
        Command::DeleteStock(id) => Reply::StockRemoved(product::delete_stock(session, id)?),
        Command::Search(query) => Reply::Search(product::search(session, query)?),
        Command::View => Reply::Inventory(product::view_inventory(session)),
        Command::Stock => Reply::Available(product::available_stock(session)),
        Command::Cart(cart_command) => match cart_command {
            CartCommand::Show => Reply::Cart(cart::get_cart(session)),
            CartCommand::Add { id, quantity } => {
                Reply::Cart(cart::add_to_cart(session, id, quantity)?)
            }
            CartCommand::Increment(id) => Reply::Cart(cart::increment(session, id)?),
            CartCommand::Decrement(id) => Reply::Cart(cart::decrement(session, id)?),
            CartCommand::Remove(id) => Reply::Cart(cart::remove_from_cart(session, id)?),
            CartCommand::Clear => Reply::CartCleared(cart::clear_cart(session)?),
        },
        Command::Sell { with_bill } => Reply::Sale(sale::sell(session, with_bill, now)?),
        Command::Bill(bill_command) => match bill_command {
            BillCommand::Show => Reply::Bill(sale::show_bill(session)?),
            BillCommand::Print => Reply::BillPrinted(sale::print_bill(session)?),
            BillCommand::Close => Reply::BillClosed(sale::close_bill(session)?),
        },
        Command::Config => Reply::Config(config::get_config(session)),
        Command::Export => Reply::Export(config::export_state(session)),
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit,
    };
    Ok(reply)
}

/// Switches section and returns that section's screen.
fn navigate(session: &mut Session, section: Section) -> Result<Reply, ApiError> {
    session.apply(Action::Navigate { section })?;

    Ok(match section {
        Section::Add => Reply::AddForm(product::add_form(session)?),
        Section::View => Reply::Inventory(product::view_inventory(session)),
        Section::Sell => Reply::Available(product::available_stock(session)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockdesk_core::Money;

    fn run(session: &mut Session, line: &str) -> Result<Reply, ApiError> {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .unwrap();
        let command = parse_command(line)?.expect("not a blank line");
        execute(session, command, now)
    }

    #[test]
    fn test_checkout_script() {
        let mut session = Session::new(ConfigState::default());

        run(&mut session, "nav sell").unwrap();
        assert_eq!(session.pos().section(), Section::Sell);

        run(&mut session, "cart add STK002 2").unwrap();
        run(&mut session, "cart add STK003").unwrap();

        let Reply::Sale(sale) = run(&mut session, "sell bill").unwrap() else {
            panic!("expected a sale reply");
        };
        assert_eq!(sale.total, Money::from_major(2_200));

        let Reply::Bill(bill) = run(&mut session, "bill").unwrap() else {
            panic!("expected a bill reply");
        };
        assert_eq!(bill.items.len(), 2);

        run(&mut session, "bill close").unwrap();
        assert!(session.pos().bill().is_none());
    }

    #[test]
    fn test_navigate_returns_screen() {
        let mut session = Session::new(ConfigState::default());
        let Reply::AddForm(form) = run(&mut session, "nav add").unwrap() else {
            panic!("expected the add form");
        };
        assert_eq!(form.next_id, "STK004");
        assert_eq!(form.categories.len(), 5);

        assert!(matches!(run(&mut session, "nav view").unwrap(), Reply::Inventory(_)));
    }

    #[test]
    fn test_reply_json_shape() {
        let mut session = Session::new(ConfigState::default());
        let reply = run(&mut session, "cart add STK001").unwrap();

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "cart");
        assert_eq!(json["cart"]["itemCount"], 1);
        assert!(json.get("notice").is_none());

        assert_eq!(serde_json::to_value(Reply::Help).unwrap()["kind"], "help");
    }
}
