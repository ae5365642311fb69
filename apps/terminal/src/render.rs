//! # Text Rendering
//!
//! Turns a [`Reply`] into what the operator reads. `--json` bypasses this
//! module entirely.

use stockdesk_core::invoice::render_text;
use stockdesk_core::{CartSummary, StockItem};

use crate::commands::product::{AvailableResponse, InventoryResponse};
use crate::commands::Reply;
use crate::state::ConfigState;

pub const HELP: &str = "\
Sections
  nav add|view|sell                 switch section
Stock
  add name=<..> qty=<..> price=<..> category=<..> [id=<..>]
                                    add a stock item (quote values with spaces)
  delete <id>                       delete a stock item
  search [query]                    filter by name, ID, category or price (empty clears)
  view                              inventory table
  stock                             items available for sale, and the cart
Cart
  cart                              show the cart
  cart add <id> [qty]               reserve stock into the cart
  cart + <id> / cart - <id>         one more / one less
  cart rm <id>                      remove a line
  cart clear                        empty the cart
Sale
  sell                              complete the sale without a bill
  sell bill                         complete the sale and generate a bill
  bill                              show the bill
  bill print                        save the bill as an HTML invoice
  bill close                        close the bill
Other
  config                            show configuration
  export                            dump the full state as JSON
  help                              this text
  quit                              leave";

/// Renders a successful reply as plain text.
pub fn render(reply: &Reply, config: &ConfigState) -> String {
    let currency = config.currency();

    let text = match reply {
        Reply::AddForm(form) => [
            "Add Stock".to_string(),
            format!("  Next ID:    {} (used when id= is left out)", form.next_id),
            format!("  Categories: {}", form.categories.join(", ")),
            "  Usage:      add name=<name> qty=<units> price=<amount> category=<category> [id=<id>]"
                .to_string(),
        ]
        .join("\n"),
        Reply::Inventory(view) => render_inventory(view, config),
        Reply::Available(available) => render_available(available, config),
        Reply::StockAdded(added) => {
            let item = &added.item;
            format!(
                "{}\n  {}  {}  {} × {}  ({})",
                added.message,
                item.id,
                item.name,
                item.quantity,
                currency.format(item.price),
                item.category
            )
        }
        Reply::StockRemoved(removed) => {
            format!("Deleted {} ({}).", removed.item.id, removed.item.name)
        }
        Reply::Search(search) if search.query.is_empty() => "Search cleared.".to_string(),
        Reply::Search(search) => format!(
            "Search \"{}\": Found {} result(s). Type `view` to list them.",
            search.query, search.matches
        ),
        Reply::Cart(response) => {
            let mut text = render_cart(&response.cart, config);
            if let Some(notice) = &response.notice {
                text.push('\n');
                text.push_str(notice);
            }
            text
        }
        Reply::CartCleared(cleared) => format!(
            "Cart cleared. {} unit(s) returned to stock.",
            cleared.released
        ),
        Reply::Sale(sale) => {
            let mut text = format!(
                "{} {} line(s), total {}.",
                sale.message,
                sale.lines,
                currency.format(sale.total)
            );
            if let Some(bill) = &sale.bill {
                text.push_str("\n\n");
                text.push_str(&render_text(
                    bill,
                    &config.store_name,
                    &currency,
                    config.invoice_width,
                ));
            }
            text
        }
        Reply::Bill(bill) => render_text(bill, &config.store_name, &currency, config.invoice_width),
        Reply::BillPrinted(printed) => format!("Invoice saved to {}", printed.path.display()),
        Reply::BillClosed(closed) if closed.was_open => "Bill closed.".to_string(),
        Reply::BillClosed(_) => "No bill was open.".to_string(),
        Reply::Config(shown) => [
            format!("Store name:          {}", shown.store_name),
            format!("Currency symbol:     {}", shown.currency_symbol),
            format!("Low stock threshold: {}", shown.low_stock_threshold),
            format!("Invoice directory:   {}", shown.invoice_dir.display()),
            format!("Invoice width:       {}", shown.invoice_width),
            format!("Seed data:           {}", shown.seed),
        ]
        .join("\n"),
        Reply::Export(state) => serde_json::to_string_pretty(state)
            .unwrap_or_else(|e| format!("error: could not encode state: {}", e)),
        Reply::Help => HELP.to_string(),
        Reply::Quit => "Bye.".to_string(),
    };

    text.trim_end().to_string()
}

fn render_inventory(view: &InventoryResponse, config: &ConfigState) -> String {
    let currency = config.currency();
    let mut lines = Vec::with_capacity(view.rows.len() + 3);

    if let Some(count) = view.result_count {
        lines.push(format!("Found {} result(s) for \"{}\"", count, view.query));
    }
    if view.rows.is_empty() {
        lines.push("No stock items.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "{:<8} {:<20} {:<12} {:>5} {:>10} {:>12}",
        "ID", "Name", "Category", "Qty", "Price", "Value"
    ));
    lines.extend(view.rows.iter().map(|row| {
        format!(
            "{:<8} {:<20} {:<12} {:>5} {:>10} {:>12}{}",
            row.id,
            row.name,
            row.category,
            row.quantity,
            currency.format_bare(row.price),
            currency.format_bare(row.value),
            if row.low_stock { "  LOW" } else { "" }
        )
    }));
    lines.push(format!(
        "Total inventory value: {}",
        currency.format(view.total_value)
    ));

    lines.join("\n")
}

fn render_available(available: &AvailableResponse, config: &ConfigState) -> String {
    let currency = config.currency();
    let mut lines = vec!["Available Stock".to_string()];

    if available.items.is_empty() {
        lines.push("  No stock available.".to_string());
    }
    lines.extend(available.items.iter().map(
        |StockItem {
             id,
             name,
             quantity,
             price,
             ..
         }| {
            format!(
                "  {:<8} {:<20} {:>5} left  {:>10}",
                id,
                name,
                quantity,
                currency.format(*price)
            )
        },
    ));
    lines.push(String::new());
    lines.push(render_cart(&available.cart, config));

    lines.join("\n")
}

fn render_cart(cart: &CartSummary, config: &ConfigState) -> String {
    let currency = config.currency();

    if cart.lines.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut lines = vec![format!("Cart ({} item(s))", cart.item_count)];
    lines.extend(cart.lines.iter().map(|line| {
        format!(
            "  {:<8} {:<20} {:>3} × {:>10} = {:>10}",
            line.id,
            line.name,
            line.quantity,
            currency.format(line.price),
            currency.format(line.line_total())
        )
    }));
    lines.push(format!("Total: {}", currency.format(cart.total)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{execute, parse_command};
    use crate::state::Session;
    use chrono::{FixedOffset, TimeZone};

    fn render_line(session: &mut Session, line: &str) -> String {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .unwrap();
        let command = parse_command(line).unwrap().unwrap();
        let reply = execute(session, command, now).unwrap();
        render(&reply, session.config())
    }

    #[test]
    fn test_render_inventory() {
        let mut session = Session::new(ConfigState::default());
        let text = render_line(&mut session, "view");

        assert!(text.starts_with("ID"));
        assert!(text.contains("Laptop"));
        assert!(text.contains("50,000"));
        assert!(text.ends_with("Total inventory value: ₹530,500"));
        assert!(!text.contains("Found"));

        render_line(&mut session, "search mouse");
        let text = render_line(&mut session, "view");
        assert!(text.starts_with("Found 1 result(s) for \"mouse\""));
    }

    #[test]
    fn test_render_messages() {
        let mut session = Session::new(ConfigState::default());

        let text = render_line(
            &mut session,
            "add name=\"USB Hub\" qty=2 price=899.5 category=accessories",
        );
        assert!(text.starts_with("Stock added successfully!"));
        assert!(text.contains("STK004"));

        let text = render_line(&mut session, "view");
        let hub = text.lines().find(|l| l.starts_with("STK004")).unwrap();
        assert!(hub.ends_with("LOW"));

        render_line(&mut session, "cart add STK004 2");
        let text = render_line(&mut session, "sell bill");
        assert!(text.starts_with("Sale completed! Bill generated."));
        assert!(text.contains("INVOICE"));
        assert!(text.contains("Grand Total:"));

        render_line(&mut session, "cart add STK001");
        let text = render_line(&mut session, "sell");
        assert!(text.starts_with("Sale completed without bill."));
    }

    #[test]
    fn test_render_available_screen() {
        let mut session = Session::new(ConfigState::default());
        render_line(&mut session, "cart add STK002 2");
        let text = render_line(&mut session, "stock");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Available Stock");
        assert!(lines[1].trim_start().starts_with("STK001"));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Cart (1 item(s))");
        assert!(lines[6].contains("STK002") && lines[6].ends_with("₹1,000"));
        assert_eq!(lines[7], "Total: ₹1,000");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_render_config_lines() {
        let session = Session::new(ConfigState::default());
        let text = render(&Reply::Config(session.config().clone()), session.config());

        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("Store name:"));
        assert!(text.ends_with("Seed data:           true"));
    }

    #[test]
    fn test_render_empty_cart() {
        let mut session = Session::new(ConfigState::default());
        assert_eq!(render_line(&mut session, "cart"), "Cart is empty.");
        assert_eq!(render_line(&mut session, "bill close"), "No bill was open.");
    }
}
