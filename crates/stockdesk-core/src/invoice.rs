//! # Invoice Rendering
//!
//! Turns a [`Bill`] into a printable document. Pure string building: writing
//! the result somewhere is the front end's job.
//!
//! ## Layout (text)
//! ```text
//! ================================================
//!                     INVOICE
//!                  StockDesk Store
//! Bill No: 1792415400000
//! Date: 19/10/2026, 18:30:00
//! ------------------------------------------------
//! Stock ID  Item               Qty   Price   Total
//! ------------------------------------------------
//! STK002    Mouse                2    ₹500  ₹1,000
//! STK003    Keyboard             1  ₹1,200  ₹1,200
//! ================================================
//! Grand Total:                              ₹2,200
//! ```

use crate::money::Currency;
use crate::types::Bill;

/// Default width for terminal invoices (80mm paper is 48 columns).
pub const DEFAULT_INVOICE_WIDTH: usize = 48;

const COL_ID: usize = 10;
const COL_QTY: usize = 5;
const COL_MONEY: usize = 8;

// =============================================================================
// Text Builder
// =============================================================================

/// Fixed-width text builder.
pub struct TextBuilder {
    buf: String,
    width: usize,
}

impl TextBuilder {
    pub fn new(width: usize) -> Self {
        TextBuilder {
            buf: String::with_capacity(1024),
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    pub fn center(&mut self, s: &str) -> &mut Self {
        let w = display_width(s);
        let pad = self.width.saturating_sub(w) / 2;
        self.line(&format!("{}{}", " ".repeat(pad), s))
    }

    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    /// Left text left-aligned, right text right-aligned on one line.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = display_width(left);
        let rw = display_width(right);

        if lw + rw >= self.width {
            self.line(&format!("{left} {right}"))
        } else {
            let spaces = self.width - lw - rw;
            self.line(&format!("{}{}{}", left, " ".repeat(spaces), right))
        }
    }

    pub fn build(self) -> String {
        self.buf
    }
}

/// Width in terminal columns, counting every char as one.
fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    let w = display_width(&truncated);
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(w)))
}

fn pad_left(s: &str, width: usize) -> String {
    let w = display_width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

// =============================================================================
// Renderers
// =============================================================================

/// Renders a bill as a fixed-width plain-text invoice.
pub fn render_text(bill: &Bill, store_name: &str, currency: &Currency, width: usize) -> String {
    // Columns: id | item (flex) | qty | price | total
    let item_col = width
        .saturating_sub(COL_ID + COL_QTY + 2 * COL_MONEY)
        .max(8);

    let row = |id: &str, item: &str, qty: &str, price: &str, total: &str| {
        format!(
            "{}{}{}{}{}",
            pad_right(id, COL_ID),
            pad_right(item, item_col),
            pad_left(qty, COL_QTY),
            pad_left(price, COL_MONEY),
            pad_left(total, COL_MONEY)
        )
    };

    let mut b = TextBuilder::new(width);
    b.sep_double()
        .center("INVOICE")
        .center(store_name)
        .line(&format!("Bill No: {}", bill.id))
        .line(&format!("Date: {}", bill.date))
        .sep_single()
        .line(row("Stock ID", "Item", "Qty", "Price", "Total").trim_end())
        .sep_single();

    for line in &bill.items {
        b.line(&row(
            &line.id,
            &line.name,
            &line.quantity.to_string(),
            &currency.format(line.price),
            &currency.format(line.line_total()),
        ));
    }

    b.sep_double()
        .line_lr("Grand Total:", &currency.format(bill.total));
    b.build()
}

/// Renders a bill as a standalone HTML document ready for a print dialog.
pub fn render_html(bill: &Bill, store_name: &str, currency: &Currency) -> String {
    let rows: String = bill
        .items
        .iter()
        .map(|line| {
            format!(
                "\n            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&line.id),
                escape_html(&line.name),
                line.quantity,
                escape_html(&currency.format(line.price)),
                escape_html(&currency.format(line.line_total())),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Bill {id}</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 20px; }}
      .bill-header {{ text-align: center; margin-bottom: 20px; }}
      .bill-details {{ margin-bottom: 20px; }}
      table {{ width: 100%; border-collapse: collapse; }}
      th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
      th {{ background-color: #f2f2f2; }}
      .total {{ font-weight: bold; font-size: 18px; }}
    </style>
  </head>
  <body>
    <div class="bill">
      <div class="bill-header">
        <h2>INVOICE</h2>
        <p>{store}</p>
        <p>Bill No: {id}</p>
        <p>Date: {date}</p>
      </div>
      <div class="bill-details">
        <table>
          <thead>
            <tr><th>Stock ID</th><th>Item</th><th>Qty</th><th>Price</th><th>Total</th></tr>
          </thead>
          <tbody>{rows}
          </tbody>
        </table>
        <div class="total">
          <p>Grand Total: {total}</p>
        </div>
      </div>
    </div>
  </body>
</html>
"#,
        id = bill.id,
        store = escape_html(store_name),
        date = escape_html(&bill.date),
        rows = rows,
        total = escape_html(&currency.format(bill.total)),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
