//! # StockDesk Terminal Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockDesk Terminal                               │
//! │                                                                         │
//! │  stdin ──► commands/parser ──► commands/* ──► stockdesk-core (PosState) │
//! │                                      │                                  │
//! │  stdout ◄── render / JSON ◄──────────┘                                  │
//! │  stderr ◄── tracing logs                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    stockdesk_terminal_lib::run()?;
    Ok(())
}
