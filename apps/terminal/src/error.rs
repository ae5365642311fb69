//! # API Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockDesk                              │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  > cart add STK003 5                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Handler                                                 │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Parse Error? ─────── ApiError::validation("...") ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Rejected Action? ─── CoreError::InsufficientStock ─ ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  error: Insufficient stock! STK003: 3 available, 5 requested            │
//! │  (or with --json)                                                       │
//! │  {"code":"INSUFFICIENT_STOCK","message":"Insufficient stock! ..."}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup failures (bad configuration, a broken stdin) are a separate
//! [`TerminalError`]: they end the session instead of being reported per
//! command.

use serde::Serialize;
use stockdesk_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::state::ConfigError;

/// API error returned from command handlers.
///
/// ## Serialization
/// This is what `--json` prints when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Stock item not found: STK404"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Stock item or cart line not found
    NotFound,

    /// Input validation failed (form fields, command syntax)
    ValidationError,

    /// Business rule blocked the action
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Insufficient stock
    InsufficientStock,

    /// Writing an invoice or serializing output failed
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StockItemNotFound(id) => ApiError::not_found("Stock item", &id),
            CoreError::CartLineNotFound(id) => ApiError::not_found("Cart line", &id),
            CoreError::InsufficientStock {
                id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock! {}: {} available, {} requested",
                    id, available, requested
                ),
            ),
            CoreError::NoStockAvailable(id) => ApiError::new(
                ErrorCode::InsufficientStock,
                format!("No more stock available! ({})", id),
            ),
            CoreError::EmptyCart => ApiError::cart("Cart is empty!"),
            CoreError::StockReserved { id, reserved } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!(
                    "Cannot delete {}: {} unit(s) are in the cart. Remove them from the cart first.",
                    id, reserved
                ),
            ),
            CoreError::StockIdsExhausted => ApiError::new(
                ErrorCode::BusinessLogic,
                "No stock IDs left to generate. Give the item an id=<..>.",
            ),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

/// Form and argument errors surface as `VALIDATION_ERROR`.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Required { .. } => {
                ApiError::validation(format!("Please fill all fields: {}", err))
            }
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Session-ending errors
// =============================================================================

/// Failures that stop the terminal session.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Unknown option '{0}'. Try --help.")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}
