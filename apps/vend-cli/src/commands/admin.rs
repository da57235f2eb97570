//! # Admin Commands
//!
//! Operator functions behind the admin password: inventory, restocking,
//! transaction history, statistics, new products and cash collection.

use serde::Serialize;
use tracing::{debug, info, warn};
use vend_core::{
    CatalogItem, DrinkKind, Money, Product, StatisticsSnapshot, Transaction,
};

use super::normalize_code;
use crate::error::{CliError, ErrorCode};
use crate::state::{ConfigState, MachineState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub items: Vec<CatalogItem>,
    pub total_products: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockResponse {
    pub code: String,
    pub quantity: i64,
}

/// Statistics plus an inventory summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatisticsResponse {
    pub statistics: StatisticsSnapshot,
    pub total_units: i64,
    pub out_of_stock: usize,
    pub unique_products: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashOutResponse {
    pub amount: Money,
}

/// Drink type picked from the "Add New Item" sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrinkChoice {
    Soda,
    Juice,
    Water,
}

impl DrinkChoice {
    /// Parses a sub-menu choice: `1` soda, `2` juice, `3` water.
    pub fn parse(input: &str) -> Result<Self, CliError> {
        match input.trim() {
            "1" => Ok(DrinkChoice::Soda),
            "2" => Ok(DrinkChoice::Juice),
            "3" => Ok(DrinkChoice::Water),
            _ => Err(CliError::validation("Invalid drink type!")),
        }
    }
}

/// Raw answers collected by the "Add New Item" dialog.
#[derive(Debug, Clone)]
pub struct NewItemRequest {
    pub code: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub kind: DrinkKind,
}

/// Checks the admin password.
pub fn authenticate(config: &ConfigState, password: &str) -> Result<(), CliError> {
    if password.trim() == config.admin_password {
        info!("Admin authenticated");
        Ok(())
    } else {
        warn!("Admin authentication failed");
        Err(CliError::new(ErrorCode::Unauthorized, "Invalid password!"))
    }
}

/// Gets the full inventory with categories and descriptions.
pub fn inventory(machine: &MachineState) -> InventoryResponse {
    debug!("inventory command");
    let items = machine.with_machine(|m| m.catalog_snapshot());
    InventoryResponse {
        total_products: items.len(),
        items,
    }
}

/// Normalizes a code and checks the product exists.
pub fn require_existing(machine: &MachineState, code_input: &str) -> Result<String, CliError> {
    let code = normalize_code(code_input);
    if machine.with_machine(|m| m.catalog().lookup(&code).is_some()) {
        Ok(code)
    } else {
        Err(CliError::not_found("Item", &code))
    }
}

/// Normalizes a code and checks no product uses it yet.
pub fn require_unused(machine: &MachineState, code_input: &str) -> Result<String, CliError> {
    let code = normalize_code(code_input);
    if machine.with_machine(|m| m.catalog().lookup(&code).is_some()) {
        Err(CliError::validation(format!(
            "Item with code {} already exists!",
            code
        )))
    } else {
        Ok(code)
    }
}

/// Adds stock to an existing product.
///
/// ## Errors
/// - Unknown code → `NotFound`
/// - Non-numeric or non-positive quantity → `ValidationError`
pub fn restock(
    machine: &MachineState,
    code_input: &str,
    quantity_input: &str,
) -> Result<RestockResponse, CliError> {
    let code = normalize_code(code_input);
    debug!(code = %code, quantity = %quantity_input, "restock command");

    let quantity: i64 = quantity_input
        .trim()
        .parse()
        .map_err(|_| CliError::validation("Please enter a valid number!"))?;
    if quantity <= 0 {
        return Err(CliError::validation("Quantity must be positive!"));
    }

    machine.with_machine_mut(|m| {
        if !m.restock(&code, quantity)? {
            return Err(CliError::not_found("Item", &code));
        }
        Ok(RestockResponse {
            quantity: m.catalog().stock_level(&code),
            code,
        })
    })
}

/// Gets every recorded transaction in order.
pub fn transactions(machine: &MachineState) -> Vec<Transaction> {
    debug!("transactions command");
    machine.with_machine(|m| m.transactions().to_vec())
}

/// Gets statistics together with an inventory summary.
pub fn statistics(machine: &MachineState) -> AdminStatisticsResponse {
    debug!("admin statistics command");
    machine.with_machine(|m| {
        let catalog = m.catalog();
        AdminStatisticsResponse {
            statistics: m.statistics(),
            total_units: catalog.total_units(),
            out_of_stock: catalog.out_of_stock_count(),
            unique_products: catalog.len(),
        }
    })
}

/// Adds a brand-new product.
///
/// ## Validation
/// - Code must be unused (existing slots are restocked, not replaced)
/// - Price must parse and be positive
/// - Quantity must parse and be zero or more
/// - Code and name go through `Product::new`
pub fn add_item(machine: &MachineState, request: NewItemRequest) -> Result<CatalogItem, CliError> {
    let code = normalize_code(&request.code);
    debug!(code = %code, "add_item command");

    let price: Money = request.price.trim().parse().map_err(|_| {
        CliError::validation("Invalid input! Please enter valid numbers for price and quantity.")
    })?;
    let quantity: i64 = request.quantity.trim().parse().map_err(|_| {
        CliError::validation("Invalid input! Please enter valid numbers for price and quantity.")
    })?;
    if !price.is_positive() || quantity < 0 {
        return Err(CliError::validation(
            "Price must be positive and quantity non-negative!",
        ));
    }

    let product = Product::new(code.as_str(), request.name, price, request.kind)?;

    machine.with_machine_mut(|m| {
        if m.catalog().lookup(&code).is_some() {
            return Err(CliError::validation(format!(
                "Item with code {} already exists!",
                code
            )));
        }
        let item = CatalogItem::from_product(&product, quantity);
        m.add_product(product, quantity)?;
        Ok(item)
    })
}

/// Collects the machine's takings.
pub fn cash_out(machine: &MachineState) -> CashOutResponse {
    debug!("cash_out command");
    CashOutResponse {
        amount: machine.with_machine_mut(|m| m.cash_out()),
    }
}
