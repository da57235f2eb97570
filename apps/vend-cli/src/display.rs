//! # Display
//!
//! Text rendering for the console. Every function writes to any
//! [`Write`] so tests can capture output in a `Vec<u8>`.
//!
//! ## Message Prefixes
//! ```text
//! [SUCCESS] Inserted $2.00. New balance: $2.00
//! [ERROR]   Invalid product code: Z9
//! [WARNING] No transactions recorded yet.
//! [INFO]    Refunding $2.00
//! ```

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use vend_core::{CatalogItem, StatisticsSnapshot, Transaction};

use crate::commands::admin::AdminStatisticsResponse;
use crate::commands::customer::{MenuResponse, Receipt};
use crate::state::ConfigState;

const WIDTH: usize = 60;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Primitives
// =============================================================================

pub fn header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(WIDTH))?;
    writeln!(out, "{:^width$}", title, width = WIDTH)?;
    writeln!(out, "{}", "=".repeat(WIDTH))
}

pub fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", title)?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

pub fn success<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "[SUCCESS] {}", message)
}

pub fn error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "[ERROR] {}", message)
}

pub fn warning<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "[WARNING] {}", message)
}

pub fn info<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "[INFO] {}", message)
}

/// Receipt and history timestamps, to the second.
fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIME_FORMAT).to_string()
}

// =============================================================================
// Customer Screens
// =============================================================================

pub fn welcome<W: Write>(out: &mut W, config: &ConfigState) -> io::Result<()> {
    header(out, &config.machine_name.to_uppercase())?;
    writeln!(out, "Insert money, pick a slot, collect your change.")?;
    writeln!(out, "{}", "=".repeat(WIDTH))
}

pub fn customer_options<W: Write>(out: &mut W) -> io::Result<()> {
    section(out, "OPTIONS")?;
    for line in [
        "1. View Menu",
        "2. Insert Money",
        "3. Select Item",
        "4. View Statistics",
        "5. Refund & Exit",
        "6. Admin Mode",
        "7. Quit",
    ] {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn menu<W: Write>(out: &mut W, config: &ConfigState, menu: &MenuResponse) -> io::Result<()> {
    header(out, "VENDING MACHINE MENU")?;
    writeln!(out, "\nYour Balance: {}\n", config.format_currency(menu.balance))?;
    writeln!(
        out,
        "{:<6} | {:<18} | {:<8} | {:<6} | Status",
        "Code", "Name", "Price", "Stock"
    )?;
    writeln!(out, "{}", "-".repeat(WIDTH))?;

    for item in &menu.items {
        let status = if item.is_available() {
            "Available"
        } else {
            "OUT OF STOCK"
        };
        writeln!(
            out,
            "{:<6} | {:<18} | {:<8} | {:<6} | {}",
            item.code,
            item.name,
            config.format_currency(item.price),
            item.quantity,
            status
        )?;
    }
    writeln!(out, "{}", "-".repeat(WIDTH))?;
    writeln!(out, "{} of {} products in stock", menu.available, menu.items.len())
}

pub fn receipt<W: Write>(out: &mut W, config: &ConfigState, receipt: &Receipt) -> io::Result<()> {
    let txn = &receipt.transaction;
    header(out, "RECEIPT")?;
    writeln!(out, "Transaction ID: {}", txn.id())?;
    writeln!(out, "Time: {}", format_time(txn.timestamp()))?;
    writeln!(out, "\nItem: {}", txn.product_name())?;
    if !receipt.description.is_empty() {
        writeln!(out, "Description: {}", receipt.description)?;
    }
    writeln!(out, "\nPrice: {}", config.format_currency(txn.price()))?;
    writeln!(out, "Paid: {}", config.format_currency(txn.amount_tendered()))?;
    writeln!(out, "Change: {}", config.format_currency(txn.change()))?;
    writeln!(out, "\nStatus: {}", txn.status())?;
    writeln!(out, "\nThank you for your purchase!")?;
    writeln!(out, "{}", "=".repeat(WIDTH))
}

pub fn statistics<W: Write>(
    out: &mut W,
    config: &ConfigState,
    stats: &StatisticsSnapshot,
) -> io::Result<()> {
    header(out, "TRANSACTION STATISTICS")?;
    writeln!(out, "Total Transactions: {}", stats.total)?;
    writeln!(out, "Successful: {}", stats.successful)?;
    writeln!(out, "Failed: {}", stats.failed)?;
    writeln!(out, "Success Rate: {:.1}%", stats.success_rate_percent)?;
    writeln!(
        out,
        "Total Revenue: {}",
        config.format_currency(stats.total_revenue)
    )
}

// =============================================================================
// Admin Screens
// =============================================================================

pub fn admin_options<W: Write>(out: &mut W) -> io::Result<()> {
    section(out, "ADMIN OPTIONS")?;
    for line in [
        "1. View Inventory",
        "2. Restock Item",
        "3. View Transactions",
        "4. View Statistics",
        "5. Add New Item",
        "6. Cash Out",
        "7. Exit Admin Panel",
    ] {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn inventory<W: Write>(
    out: &mut W,
    config: &ConfigState,
    items: &[CatalogItem],
) -> io::Result<()> {
    header(out, "INVENTORY MANAGEMENT")?;
    if items.is_empty() {
        return warning(out, "Inventory is empty!");
    }

    writeln!(
        out,
        "\n{:<6} | {:<18} | {:<8} | {:<5} | {:<10} | Description",
        "Code", "Name", "Price", "Qty", "Category"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;
    for item in items {
        writeln!(
            out,
            "{:<6} | {:<18} | {:<8} | {:<5} | {:<10} | {}",
            item.code,
            item.name,
            config.format_currency(item.price),
            item.quantity,
            item.category.to_string(),
            item.description
        )?;
    }
    writeln!(out, "{}", "-".repeat(85))?;
    writeln!(out, "Total unique products: {}", items.len())
}

pub fn transactions<W: Write>(
    out: &mut W,
    config: &ConfigState,
    transactions: &[Transaction],
) -> io::Result<()> {
    header(out, "TRANSACTION HISTORY")?;
    if transactions.is_empty() {
        return warning(out, "No transactions recorded yet.");
    }

    writeln!(
        out,
        "\n{:<12} | {:<20} | {:<15} | {:<8} | {:<8} | {:<8} | Status",
        "ID", "Time", "Item", "Price", "Paid", "Change"
    )?;
    writeln!(out, "{}", "-".repeat(95))?;
    for txn in transactions {
        writeln!(
            out,
            "{:<12} | {:<20} | {:<15} | {:<8} | {:<8} | {:<8} | {}",
            txn.id().to_string(),
            format_time(txn.timestamp()),
            txn.product_name(),
            config.format_currency(txn.price()),
            config.format_currency(txn.amount_tendered()),
            config.format_currency(txn.change()),
            txn.status()
        )?;
    }
    writeln!(out, "{}", "-".repeat(95))?;
    writeln!(out, "Total transactions: {}", transactions.len())
}

pub fn admin_statistics<W: Write>(
    out: &mut W,
    config: &ConfigState,
    response: &AdminStatisticsResponse,
) -> io::Result<()> {
    statistics(out, config, &response.statistics)?;
    writeln!(out, "\n--- Inventory Summary ---")?;
    writeln!(out, "Total items in stock: {}", response.total_units)?;
    writeln!(out, "Products out of stock: {}", response.out_of_stock)?;
    writeln!(out, "Unique products: {}", response.unique_products)
}

pub fn drink_types<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nSelect drink type:")?;
    writeln!(out, "1. Soda")?;
    writeln!(out, "2. Juice")?;
    writeln!(out, "3. Water")
}
