//! # Validation Module
//!
//! Converts raw operator input into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Splits the command line into raw text fields                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields present                                           │
//! │  ├── Numbers really are numbers (no lenient coercion)                  │
//! │  └── Category is one of the offered options                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory / cart rules (uniqueness, availability)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockdesk_core::validation::{parse_quantity, parse_price};
//!
//! assert_eq!(parse_quantity("12").unwrap(), 12);
//! assert!(parse_quantity("twelve").is_err());
//! assert!(parse_price("-1").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, NewStockItem, StockDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_ID_LEN: usize = 50;
const MAX_QUERY_LEN: usize = 100;

/// Largest stock quantity a single item can hold.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Largest unit price (10,000,000.00).
///
/// With [`MAX_QUANTITY`] a line value is at most 10^15 minor units, so
/// inventory and bill totals over thousands of lines still fit in an `i64`.
pub const MAX_PRICE: Money = Money::from_major(10_000_000);

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an optional caller-supplied stock ID.
///
/// Blank means "generate one" and yields `None`. Any other text is kept
/// verbatim after trimming, so free-form IDs such as `SKU-9` are accepted.
pub fn validate_stock_id(id: &str) -> ValidationResult<Option<String>> {
    let id = id.trim();

    if id.is_empty() {
        return Ok(None);
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(Some(id.to_string()))
}

/// Validates a search query.
///
/// Empty is fine (no filter). The query is NOT trimmed: the price match
/// compares against the text as typed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a stock quantity: a whole number from 0 to [`MAX_QUANTITY`].
pub fn parse_quantity(raw: &str) -> ValidationResult<u32> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    if let Some(rest) = raw.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Negative {
                field: "quantity".to_string(),
            });
        }
    }

    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidNumber {
            field: "quantity".to_string(),
            value: raw.to_string(),
        });
    }

    let qty: u32 = raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field: "quantity".to_string(),
        value: raw.to_string(),
    })?;

    if qty > MAX_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_QUANTITY.to_string(),
        });
    }

    Ok(qty)
}

/// Parses a cart quantity: a whole number of at least 1.
pub fn parse_cart_quantity(raw: &str) -> ValidationResult<u32> {
    let qty = parse_quantity(raw)?;
    validate_cart_quantity(qty)?;
    Ok(qty)
}

/// Rejects a zero quantity for cart operations.
pub fn validate_cart_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Parses a unit price: a non-negative decimal with at most two fractional
/// digits, no higher than [`MAX_PRICE`].
pub fn parse_price(raw: &str) -> ValidationResult<Money> {
    if raw.trim().is_empty() {
        return Err(ValidationError::required("price"));
    }

    let price: Money = raw.parse()?;
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_PRICE.plain_string(),
        });
    }

    Ok(price)
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the whole add-stock form.
///
/// ## Order of Checks
/// Missing fields are reported first, in form order (name, quantity, price,
/// category), so an empty form always says "name is required". Only then are
/// the values parsed.
pub fn validate_stock_draft(draft: &StockDraft) -> ValidationResult<NewStockItem> {
    for (field, value) in [
        ("name", &draft.name),
        ("quantity", &draft.quantity),
        ("price", &draft.price),
        ("category", &draft.category),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::required(field));
        }
    }

    Ok(NewStockItem {
        id: validate_stock_id(&draft.id)?,
        name: validate_name(&draft.name)?,
        quantity: parse_quantity(&draft.quantity)?,
        price: parse_price(&draft.price)?,
        category: draft.category.parse::<Category>()?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> StockDraft {
        StockDraft {
            name: "Monitor".to_string(),
            id: String::new(),
            quantity: "7".to_string(),
            price: "8999.50".to_string(),
            category: "electronics".to_string(),
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity(" 42 ").unwrap(), 42);

        assert_eq!(
            parse_quantity("-3"),
            Err(ValidationError::Negative {
                field: "quantity".to_string()
            })
        );
        assert!(matches!(
            parse_quantity("4.5"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_quantity("ten"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_quantity("99999999999"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert_eq!(parse_quantity("1000000").unwrap(), MAX_QUANTITY);
        assert_eq!(
            parse_quantity("4294967295"),
            Err(ValidationError::TooLarge {
                field: "quantity".to_string(),
                max: "1000000".to_string()
            })
        );
        assert!(matches!(parse_quantity(""), Err(ValidationError::Required { .. })));
    }

    #[test]
    fn test_parse_cart_quantity() {
        assert_eq!(parse_cart_quantity("1").unwrap(), 1);
        assert!(matches!(
            parse_cart_quantity("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("0").unwrap(), Money::zero());
        assert_eq!(parse_price("1200").unwrap(), Money::from_major(1200));
        assert!(matches!(parse_price("-5"), Err(ValidationError::Negative { .. })));
        assert!(matches!(
            parse_price("12.999"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert_eq!(parse_price("10000000").unwrap(), MAX_PRICE);
        assert!(matches!(
            parse_price("10000000.01"),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            parse_price("92233720368547758"),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_largest_accepted_line_value_fits() {
        let line = MAX_PRICE.multiply_quantity(MAX_QUANTITY);
        assert_eq!(line.minor_units(), 1_000_000_000_000_000);

        let totals: Money = std::iter::repeat(line).take(9_000).sum();
        assert_eq!(totals.minor_units(), 9_000_000_000_000_000_000);
    }

    #[test]
    fn test_validate_stock_id() {
        assert_eq!(validate_stock_id("   ").unwrap(), None);
        assert_eq!(validate_stock_id(" STK010 ").unwrap(), Some("STK010".to_string()));
        assert!(validate_stock_id(&"X".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_search_query_keeps_text_as_typed() {
        assert_eq!(validate_search_query(" lap").unwrap(), " lap");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_stock_draft() {
        let item = validate_stock_draft(&draft()).unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.name, "Monitor");
        assert_eq!(item.quantity, 7);
        assert_eq!(item.price, Money::from_minor(899_950));
        assert_eq!(item.category, Category::Electronics);
    }

    #[test]
    fn test_validate_stock_draft_reports_first_missing_field() {
        assert_eq!(
            validate_stock_draft(&StockDraft::default()),
            Err(ValidationError::required("name"))
        );

        let mut no_price = draft();
        no_price.price = "  ".to_string();
        assert_eq!(validate_stock_draft(&no_price), Err(ValidationError::required("price")));

        let mut no_category = draft();
        no_category.category.clear();
        assert_eq!(
            validate_stock_draft(&no_category),
            Err(ValidationError::required("category"))
        );
    }

    #[test]
    fn test_validate_stock_draft_rejects_unknown_category() {
        let mut bad = draft();
        bad.category = "Groceries".to_string();
        assert!(matches!(
            validate_stock_draft(&bad),
            Err(ValidationError::NotAllowed { .. })
        ));
    }
}
