//! # Domain Types
//!
//! Core domain types used throughout the vending machine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │ StatisticsSnap. │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code ("A1")    │   │  id (TXN-0001)  │   │  total          │       │
//! │  │  name           │   │  timestamp      │   │  successful     │       │
//! │  │  price (Money)  │   │  price/tendered │   │  failed         │       │
//! │  │  kind ──────┐   │   │  change/status  │   │  revenue/rate   │       │
//! │  └─────────────┼───┘   └─────────────────┘   └─────────────────┘       │
//! │                ▼                                                        │
//! │  ┌─────────────────────────────────────┐   ┌─────────────────┐         │
//! │  │  DrinkKind (tagged variant)         │   │   CatalogItem   │         │
//! │  │  Soda  { is_diet }                  │   │  display row    │         │
//! │  │  Juice { fruit }                    │   │  (read-only)    │         │
//! │  │  Water { is_sparkling }             │   └─────────────────┘         │
//! │  └─────────────────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drink behaviour differs only in descriptive strings, so the kinds are a
//! plain enum with [`describe`] and [`category_of`] switching on the tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_code, validate_product_name};

// =============================================================================
// Drink Kind
// =============================================================================

/// Kind-specific attributes of a drink.
///
/// ## Serialized Shape
/// ```json
/// { "type": "soda",  "is_diet": true }
/// { "type": "juice", "fruit": "Orange" }
/// { "type": "water", "is_sparkling": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrinkKind {
    /// Carbonated soft drink.
    Soda {
        #[serde(default)]
        is_diet: bool,
    },
    /// Fruit juice.
    Juice {
        #[serde(default = "default_fruit")]
        fruit: String,
    },
    /// Bottled water.
    Water {
        #[serde(default)]
        is_sparkling: bool,
    },
}

fn default_fruit() -> String {
    "Mixed".to_string()
}

/// Display category of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Soda,
    Juice,
    Water,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Soda => "Soda",
            Category::Juice => "Juice",
            Category::Water => "Water",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product loaded into one of the machine's slots.
///
/// Immutable after construction: fields are private and only readable.
/// The code is trimmed and upper-cased so `a1` and `A1` name the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductFields")]
pub struct Product {
    code: String,
    name: String,
    price: Money,
    kind: DrinkKind,
}

/// Unvalidated wire form; deserialization goes through [`Product::new`].
#[derive(Deserialize)]
struct ProductFields {
    code: String,
    name: String,
    price: Money,
    kind: DrinkKind,
}

impl TryFrom<ProductFields> for Product {
    type Error = CoreError;

    fn try_from(fields: ProductFields) -> Result<Self, Self::Error> {
        Product::new(fields.code, fields.name, fields.price, fields.kind)
    }
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for an empty/malformed code or name
    /// - `CoreError::InvalidPrice` for a price outside `0..=MAX_PRICE`
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{DrinkKind, Money, Product};
    ///
    /// let coke = Product::new("a1", "Coca-Cola", Money::from_cents(150),
    ///     DrinkKind::Soda { is_diet: false }).unwrap();
    /// assert_eq!(coke.code(), "A1");
    /// ```
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        kind: DrinkKind,
    ) -> CoreResult<Self> {
        let code = code.into();
        let name = name.into();

        validate_product_code(&code)?;
        validate_product_name(&name)?;
        validate_price(price).map_err(|_| CoreError::InvalidPrice { price })?;

        Ok(Product {
            code: code.trim().to_ascii_uppercase(),
            name: name.trim().to_string(),
            price,
            kind,
        })
    }

    /// Convenience constructor for a soda.
    pub fn soda(code: &str, name: &str, price: Money, is_diet: bool) -> CoreResult<Self> {
        Product::new(code, name, price, DrinkKind::Soda { is_diet })
    }

    /// Convenience constructor for a juice.
    pub fn juice(code: &str, name: &str, price: Money, fruit: &str) -> CoreResult<Self> {
        Product::new(
            code,
            name,
            price,
            DrinkKind::Juice {
                fruit: fruit.to_string(),
            },
        )
    }

    /// Convenience constructor for a water.
    pub fn water(code: &str, name: &str, price: Money, is_sparkling: bool) -> CoreResult<Self> {
        Product::new(code, name, price, DrinkKind::Water { is_sparkling })
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn kind(&self) -> &DrinkKind {
        &self.kind
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}

/// Returns the category a product is listed under.
pub fn category_of(product: &Product) -> Category {
    match product.kind {
        DrinkKind::Soda { .. } => Category::Soda,
        DrinkKind::Juice { .. } => Category::Juice,
        DrinkKind::Water { .. } => Category::Water,
    }
}

/// Returns the human-readable description shown on menus and receipts.
///
/// ## Example
/// ```rust
/// use vend_core::{describe, Money, Product};
///
/// let oj = Product::juice("B1", "Orange Juice", Money::from_cents(200), "Orange").unwrap();
/// assert_eq!(describe(&oj), "Fresh Orange juice");
/// ```
pub fn describe(product: &Product) -> String {
    match &product.kind {
        DrinkKind::Soda { is_diet: true } => "Diet Carbonated soft drink".to_string(),
        DrinkKind::Soda { is_diet: false } => "Carbonated soft drink".to_string(),
        DrinkKind::Juice { fruit } => format!("Fresh {} juice", fruit),
        DrinkKind::Water { is_sparkling: true } => "Sparkling mineral water".to_string(),
        DrinkKind::Water { is_sparkling: false } => "Still mineral water".to_string(),
    }
}

// =============================================================================
// Catalog Item (display snapshot)
// =============================================================================

/// One row of the catalog snapshot handed to the presentation layer.
///
/// A detached copy: holding one grants no way to mutate the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub code: String,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub category: Category,
    pub description: String,
}

impl CatalogItem {
    /// Builds a snapshot row from a product and its current stock.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CatalogItem {
            code: product.code().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            quantity,
            category: category_of(product),
            description: describe(product),
        }
    }

    /// Whether the slot can currently vend.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// Sequential transaction identifier, unique within one machine's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        TransactionId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TXN-{:04}", self.0)
    }
}

/// Final status of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
        })
    }
}

/// Immutable audit record of one purchase attempt.
///
/// Uses the snapshot pattern: name and price are frozen at the time of the
/// attempt. Only [`crate::transactions::TransactionLog`] creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    timestamp: DateTime<Utc>,
    product_code: String,
    product_name: String,
    price: Money,
    amount_tendered: Money,
    change: Money,
    status: TransactionStatus,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: TransactionId,
        timestamp: DateTime<Utc>,
        product_code: &str,
        product_name: &str,
        price: Money,
        amount_tendered: Money,
        change: Money,
        status: TransactionStatus,
    ) -> Self {
        Transaction {
            id,
            timestamp,
            product_code: product_code.to_string(),
            product_name: product_name.to_string(),
            price,
            amount_tendered,
            change,
            status,
        }
    }

    #[inline]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[inline]
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    #[inline]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Money the customer had in the machine when the attempt was made.
    #[inline]
    pub fn amount_tendered(&self) -> Money {
        self.amount_tendered
    }

    /// Change handed back. Always zero for failed attempts.
    #[inline]
    pub fn change(&self) -> Money {
        self.change
    }

    #[inline]
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Aggregate view over the transaction log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Sum of prices of successful transactions.
    pub total_revenue: Money,
    /// `successful / total * 100`, unrounded; 0 when there are no transactions.
    pub success_rate_percent: f64,
}

impl Default for StatisticsSnapshot {
    fn default() -> Self {
        StatisticsSnapshot {
            total: 0,
            successful: 0,
            failed: 0,
            total_revenue: Money::zero(),
            success_rate_percent: 0.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
