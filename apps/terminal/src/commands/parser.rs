//! # Command Line Parser
//!
//! Turns one line of operator input into a [`Command`].
//!
//! ## Quoting
//! Words split on whitespace. Single or double quotes group words, also
//! inside a `key=value` pair:
//! ```text
//! add name="Laptop Stand" qty=4 price=1499.50 category=accessories
//!     └──── name=Laptop Stand ┘
//! ```

use std::str::FromStr;

use stockdesk_core::validation::parse_cart_quantity;
use stockdesk_core::{Section, StockDraft};

use crate::error::ApiError;

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(Section),
    AddStock(StockDraft),
    DeleteStock(String),
    Search(String),
    View,
    Stock,
    Cart(CartCommand),
    Sell { with_bill: bool },
    Bill(BillCommand),
    Config,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    Show,
    Add { id: String, quantity: u32 },
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillCommand {
    Show,
    Print,
    Close,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens = tokenize(line)?;
    let Some((word, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "nav" | "go" => {
            let [section] = args else {
                return Err(usage("nav add|view|sell"));
            };
            Command::Navigate(Section::from_str(section)?)
        }
        "add" => Command::AddStock(parse_draft(args)?),
        "delete" | "del" => Command::DeleteStock(single_id(args, "delete <id>")?),
        "search" => Command::Search(args.join(" ")),
        "view" | "ls" => Command::View,
        "stock" => Command::Stock,
        "cart" => Command::Cart(parse_cart(args)?),
        "sell" => match args {
            [] => Command::Sell { with_bill: false },
            [flag] if flag.eq_ignore_ascii_case("bill") => Command::Sell { with_bill: true },
            _ => return Err(usage("sell [bill]")),
        },
        "bill" => Command::Bill(parse_bill(args)?),
        "config" => Command::Config,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown command '{}'. Type `help` for the list of commands.",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_draft(args: &[String]) -> Result<StockDraft, ApiError> {
    let mut draft = StockDraft::default();

    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            ApiError::validation(format!("Expected key=value, got '{}'", arg))
        })?;

        let slot = match key.to_ascii_lowercase().as_str() {
            "name" => &mut draft.name,
            "id" => &mut draft.id,
            "qty" | "quantity" => &mut draft.quantity,
            "price" => &mut draft.price,
            "category" | "cat" => &mut draft.category,
            _ => {
                return Err(ApiError::validation(format!(
                    "Unknown field '{}' (expected name, qty, price, category, id)",
                    key
                )))
            }
        };
        *slot = value.to_string();
    }

    Ok(draft)
}

fn parse_cart(args: &[String]) -> Result<CartCommand, ApiError> {
    let Some((sub, rest)) = args.split_first() else {
        return Ok(CartCommand::Show);
    };

    let command = match sub.to_ascii_lowercase().as_str() {
        "add" => match rest {
            [id] => CartCommand::Add {
                id: id.clone(),
                quantity: 1,
            },
            [id, qty] => CartCommand::Add {
                id: id.clone(),
                quantity: parse_cart_quantity(qty)?,
            },
            _ => return Err(usage("cart add <id> [qty]")),
        },
        "+" | "inc" => CartCommand::Increment(single_id(rest, "cart + <id>")?),
        "-" | "dec" => CartCommand::Decrement(single_id(rest, "cart - <id>")?),
        "rm" | "remove" => CartCommand::Remove(single_id(rest, "cart rm <id>")?),
        "clear" if rest.is_empty() => CartCommand::Clear,
        "show" if rest.is_empty() => CartCommand::Show,
        _ => return Err(usage("cart [add <id> [qty] | + <id> | - <id> | rm <id> | clear]")),
    };

    Ok(command)
}

fn parse_bill(args: &[String]) -> Result<BillCommand, ApiError> {
    match args {
        [] => Ok(BillCommand::Show),
        [sub] => match sub.to_ascii_lowercase().as_str() {
            "show" => Ok(BillCommand::Show),
            "print" => Ok(BillCommand::Print),
            "close" => Ok(BillCommand::Close),
            _ => Err(usage("bill [print | close]")),
        },
        _ => Err(usage("bill [print | close]")),
    }
}

fn single_id(args: &[String], form: &str) -> Result<String, ApiError> {
    match args {
        [id] => Ok(id.clone()),
        _ => Err(usage(form)),
    }
}

fn usage(form: &str) -> ApiError {
    ApiError::validation(format!("Usage: {}", form))
}

/// Splits on whitespace, honouring single and double quotes.
fn tokenize(line: &str) -> Result<Vec<String>, ApiError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ApiError::validation("Unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
