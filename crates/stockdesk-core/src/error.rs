//! # Error Types
//!
//! Domain-specific error types for stockdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockdesk-core errors (this file)                                     │
//! │  ├── CoreError        - Rejected state transitions                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  terminal app errors (separate crate)                                  │
//! │  └── ApiError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a user-correctable input error. None of them is fatal,
//! and no rejected action ever mutates state.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the inventory / cart state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No stock item with this ID exists in the inventory.
    #[error("Stock item not found: {0}")]
    StockItemNotFound(String),

    /// No cart line references this stock item ID.
    #[error("Item {0} is not in the cart")]
    CartLineNotFound(String),

    /// Requested more than is currently available.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { id: "STK004", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Terminal shows: "Insufficient stock!"
    /// ```
    #[error("Insufficient stock for {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: String,
        available: u32,
        requested: u32,
    },

    /// The cart stepper tried to take one more unit of an exhausted item.
    #[error("No more stock available for {0}")]
    NoStockAvailable(String),

    /// A sale was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The item is reserved by a cart line and cannot be deleted.
    #[error("Stock item {id} has {reserved} unit(s) reserved in the cart")]
    StockReserved { id: String, reserved: u32 },

    /// Every generated stock number is taken.
    #[error("No stock IDs left to generate; supply an id")]
    StockIdsExhausted,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised at the parsing boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Text that should have been a number.
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Negative value where only zero or more makes sense.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Number above the largest accepted value.
    #[error("{field} cannot be more than {max}")]
    TooLarge { field: String, max: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. a caller-supplied stock ID already in use).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            id: "STK004".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for STK004: available 3, requested 5"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::InvalidNumber {
            field: "price".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price must be a number, got 'abc'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("category").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
