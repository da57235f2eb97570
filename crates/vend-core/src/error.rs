//! # Errors
//!
//! A refused purchase is not an error here. Unknown codes, empty slots and
//! short balances come back as [`PurchaseOutcome::Rejected`] values, since
//! a customer hitting them is ordinary machine behaviour.
//!
//! What *is* an error:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CoreError                                                              │
//! │  ├── InvalidAmount / InvalidQuantity / InvalidPrice                     │
//! │  │     bad operator or customer input, refused before any mutation     │
//! │  ├── BalanceLimit / SlotFull / ReserveFull                              │
//! │  │     valid input that would push a counter past its limit            │
//! │  ├── Validation(ValidationError)                                        │
//! │  │     malformed code, name or typed amount                             │
//! │  └── InternalConsistency                                                │
//! │        the machine contradicted a check it had just made (a bug)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`PurchaseOutcome::Rejected`]: crate::PurchaseOutcome::Rejected

use thiserror::Error;

use crate::money::Money;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer fed the slot `0` or a negative amount. Balance unchanged.
    #[error("Invalid amount: {amount}. Amount must be positive.")]
    InvalidAmount { amount: Money },

    /// Stock in an add or restock outside `0..=MAX_STOCK`.
    #[error("Invalid quantity: {quantity}. Quantity must be between 0 and {max}.", max = crate::MAX_STOCK)]
    InvalidQuantity { quantity: i64 },

    #[error("Invalid price: {price}. Price must be between $0.00 and {max}.", max = crate::MAX_PRICE)]
    InvalidPrice { price: Money },

    /// The deposit would take the balance past [`MAX_BALANCE`](crate::MAX_BALANCE).
    /// Balance unchanged.
    #[error("Balance cannot exceed {max}. Select an item or take a refund first.")]
    BalanceLimit { max: Money },

    /// Restocking would overfill the slot. Stock unchanged.
    #[error("Slot {code} holds at most {max} units.")]
    SlotFull { code: String, max: i64 },

    /// The cash box cannot take another sale until it is cashed out.
    /// Raised before the balance is settled, so nothing moves.
    #[error("Cash reserve is full. Cash out before selling more.")]
    ReserveFull,

    /// A purchase got past its own checks and then found them false:
    ///
    /// ```text
    /// balance >= price  ──► settle(price) refused
    /// stock > 0         ──► decrement() refused
    /// ```
    ///
    /// Only a misbehaving [`PaymentBackend`](crate::PaymentBackend) can
    /// cause this. Logged and surfaced, never retried.
    ///
    /// A refused settle leaves the balance with the backend. A refused
    /// decrement comes after the settle, so the balance is already spent
    /// and is not restored; the operator has to reconcile it by hand.
    #[error("Internal consistency fault while purchasing {code}: {detail}")]
    InternalConsistency { code: String, detail: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Malformed text from the catalog file or the prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    #[error("{field} cannot exceed {max}")]
    TooLarge { field: String, max: String },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Slot codes with punctuation, amounts like `1.234`.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}
