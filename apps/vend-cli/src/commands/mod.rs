//! # Command Handlers
//!
//! Thin handlers between the console and `vend-core`. Each one takes raw
//! user text, normalizes it, runs one locked operation on the machine and
//! returns a serializable response.
//!
//! ## Modules
//! - [`customer`] - menu, deposits, purchases, statistics, refunds
//! - [`admin`] - password check, inventory, restock, history, add item, cash-out

pub mod admin;
pub mod customer;

/// Trims and upper-cases a product code typed by a user.
pub(crate) fn normalize_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}
