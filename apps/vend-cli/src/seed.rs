//! # Catalog Seeding
//!
//! Builds the machine's starting catalog.
//!
//! ## Sources
//! - [`default_catalog`]: the built-in drinks, slots A1 to C2
//! - [`load_catalog`]: a JSON file named by `VEND_CATALOG_PATH`
//!
//! ## Catalog File Format
//! ```json
//! [
//!   { "product": { "code": "A1", "name": "Coca-Cola", "price": 150,
//!                  "kind": { "type": "soda", "is_diet": false } },
//!     "quantity": 5 },
//!   { "product": { "code": "B1", "name": "Orange Juice", "price": 200,
//!                  "kind": { "type": "juice", "fruit": "Orange" } },
//!     "quantity": 3 }
//! ]
//! ```
//! Prices are in cents. Every product goes through the same validation as
//! one built in code.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use vend_core::{Catalog, CoreError, CoreResult, DrinkKind, Money, Product};

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("Cannot read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid catalog document.
    #[error("Invalid catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product or quantity broke a catalog rule.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// One slot in a catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    pub product: Product,
    pub quantity: i64,
}

/// Built-in drinks: (code, name, price in cents, kind, stock)
fn default_rows() -> Vec<(&'static str, &'static str, i64, DrinkKind, i64)> {
    let soda = |is_diet| DrinkKind::Soda { is_diet };
    let juice = |fruit: &str| DrinkKind::Juice {
        fruit: fruit.to_string(),
    };
    let water = |is_sparkling| DrinkKind::Water { is_sparkling };

    vec![
        ("A1", "Coca-Cola", 150, soda(false), 5),
        ("A2", "Pepsi", 150, soda(false), 4),
        ("A3", "Diet Coke", 150, soda(true), 3),
        ("A4", "Sprite", 125, soda(false), 6),
        ("B1", "Orange Juice", 200, juice("Orange"), 3),
        ("B2", "Apple Juice", 200, juice("Apple"), 3),
        ("B3", "Grape Juice", 225, juice("Grape"), 2),
        ("C1", "Spring Water", 100, water(false), 10),
        ("C2", "Sparkling Water", 125, water(true), 5),
    ]
}

/// Creates the default catalog the simulator starts with.
pub fn default_catalog() -> CoreResult<Catalog> {
    let mut catalog = Catalog::new();
    for (code, name, cents, kind, quantity) in default_rows() {
        let product = Product::new(code, name, Money::from_cents(cents), kind)?;
        catalog.add_product(product, quantity)?;
    }
    debug!(products = catalog.len(), "default catalog built");
    Ok(catalog)
}

/// Parses a catalog document.
///
/// Later entries with the same code replace earlier ones, as with
/// [`Catalog::add_product`].
pub fn parse_catalog(json: &str) -> Result<Catalog, SeedError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;

    let mut catalog = Catalog::new();
    for entry in entries {
        catalog.add_product(entry.product, entry.quantity)?;
    }
    Ok(catalog)
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, SeedError> {
    let json = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&json)
}
