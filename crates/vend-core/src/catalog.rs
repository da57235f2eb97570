//! # Catalog
//!
//! The registry of products and their stock counts.
//!
//! ## Invariants
//! - Codes are unique (adding an existing code replaces the entry in place)
//! - Quantity stays within `0..=MAX_STOCK`
//! - Iteration order is slot-insertion order, which is the menu order
//!
//! Stock is mutated only by [`Catalog::decrement`] (called by the purchase
//! coordinator) and [`Catalog::restock`].

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{CatalogItem, Product};
use crate::validation::validate_stock_quantity;
use crate::MAX_STOCK;

/// A product together with its current stock level.
#[derive(Debug, Clone)]
struct StockEntry {
    product: Product,
    quantity: i64,
}

/// Product catalog with stock levels.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<StockEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Registers a product with its initial stock.
    ///
    /// ## Behavior
    /// - `quantity` outside `0..=MAX_STOCK` → `CoreError::InvalidQuantity`,
    ///   catalog untouched
    /// - Code already present → entry replaced (last write wins, no merge)
    pub fn add_product(&mut self, product: Product, quantity: i64) -> CoreResult<()> {
        validate_stock_quantity(quantity).map_err(|_| CoreError::InvalidQuantity { quantity })?;

        debug!(code = %product.code(), quantity, "add_product");

        let code = product.code().to_string();
        let entry = StockEntry { product, quantity };
        if let Some(&slot) = self.index.get(&code) {
            self.entries[slot] = entry;
        } else {
            self.index.insert(code, self.entries.len());
            self.entries.push(entry);
        }

        Ok(())
    }

    /// Looks up a product by code. Never fails.
    pub fn lookup(&self, code: &str) -> Option<&Product> {
        self.entry(code).map(|e| &e.product)
    }

    /// Current stock for a code; 0 when the code is unknown.
    ///
    /// Unknown and sold-out are indistinguishable here. Call
    /// [`Catalog::lookup`] first if the difference matters.
    pub fn stock_level(&self, code: &str) -> i64 {
        self.entry(code).map_or(0, |e| e.quantity)
    }

    /// True iff the code is known and at least one unit is left.
    pub fn has_stock(&self, code: &str) -> bool {
        self.stock_level(code) > 0
    }

    /// Removes exactly one unit. Returns `false` (no-op) when nothing is left.
    pub fn decrement(&mut self, code: &str) -> bool {
        match self.entry_mut(code) {
            Some(entry) if entry.quantity > 0 => {
                entry.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Adds stock to an existing product.
    ///
    /// ## Returns
    /// - `Ok(true)` when stock was added
    /// - `Ok(false)` when the code is unknown
    /// - `Err(InvalidQuantity)` when `quantity` is outside `0..=MAX_STOCK`
    /// - `Err(SlotFull)` when the slot would end up above `MAX_STOCK`
    pub fn restock(&mut self, code: &str, quantity: i64) -> CoreResult<bool> {
        validate_stock_quantity(quantity).map_err(|_| CoreError::InvalidQuantity { quantity })?;

        match self.entry_mut(code) {
            Some(entry) => {
                entry.quantity = entry
                    .quantity
                    .checked_add(quantity)
                    .filter(|level| validate_stock_quantity(*level).is_ok())
                    .ok_or_else(|| CoreError::SlotFull {
                        code: code.to_string(),
                        max: MAX_STOCK,
                    })?;
                debug!(code, added = quantity, now = entry.quantity, "restock");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Products that currently have stock, in menu order.
    pub fn available(&self) -> impl Iterator<Item = &Product> {
        self.entries
            .iter()
            .filter(|e| e.quantity > 0)
            .map(|e| &e.product)
    }

    /// Sum of units across all slots.
    pub fn total_units(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |total, e| total.saturating_add(e.quantity))
    }

    /// Number of known products with zero stock.
    pub fn out_of_stock_count(&self) -> usize {
        self.entries.iter().filter(|e| e.quantity == 0).count()
    }

    /// Detached, ordered copy of the catalog for display.
    pub fn snapshot(&self) -> Vec<CatalogItem> {
        self.entries
            .iter()
            .map(|e| CatalogItem::from_product(&e.product, e.quantity))
            .collect()
    }

    fn entry(&self, code: &str) -> Option<&StockEntry> {
        self.index.get(code).map(|&slot| &self.entries[slot])
    }

    fn entry_mut(&mut self, code: &str) -> Option<&mut StockEntry> {
        match self.index.get(code) {
            Some(&slot) => self.entries.get_mut(slot),
            None => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
