//! # vend-core: Purchase Logic for the Vending Machine
//!
//! This crate holds the machine's state and the purchase state machine. It
//! does no terminal or file I/O; the `vend` CLI drives it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vending Machine Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vend (terminal CLI)                          │   │
//! │  │    Menu ──► Insert Money ──► Select Item ──► Receipt            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ MachineState (one lock)                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │  machine  │  │  catalog  │  │  payment  │  │transactions│  │   │
//! │  │   │ purchase  │  │  stock    │  │  balance  │  │ audit log  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, CatalogItem, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`catalog`] - Products and stock levels
//! - [`payment`] - Customer balance ledger and payment backends
//! - [`transactions`] - Append-only transaction log and statistics
//! - [`machine`] - The purchase coordinator
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Catalog, Money, Product, VendingMachine};
//!
//! let mut catalog = Catalog::new();
//! catalog
//!     .add_product(Product::soda("A1", "Coca-Cola", Money::from_cents(150), false).unwrap(), 5)
//!     .unwrap();
//!
//! let mut machine = VendingMachine::new(catalog);
//! machine.deposit(Money::from_cents(200)).unwrap();
//!
//! let outcome = machine.purchase("A1").unwrap();
//! assert!(outcome.is_success());
//! assert_eq!(outcome.change().cents(), 50);
//! assert_eq!(machine.catalog().stock_level("A1"), 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod machine;
pub mod money;
pub mod payment;
pub mod transactions;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use machine::{FailureKind, PurchaseFailure, PurchaseOutcome, VendingMachine};
pub use money::Money;
pub use payment::{CashPayment, PaymentBackend};
pub use transactions::TransactionLog;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a slot code such as `A1`.
pub const MAX_PRODUCT_CODE_LEN: usize = 4;

/// Maximum product name length, in characters.
///
/// Keeps menu rows within an 80-column terminal.
pub const MAX_PRODUCT_NAME_LEN: usize = 40;

/// Highest shelf price a product may carry.
pub const MAX_PRICE: Money = Money::from_cents(99_999);

/// Most money the coin slot holds for one customer.
///
/// At least [`MAX_PRICE`], so every product can be bought.
pub const MAX_BALANCE: Money = Money::from_cents(100_000);

/// Units a single slot holds.
pub const MAX_STOCK: i64 = 999;
