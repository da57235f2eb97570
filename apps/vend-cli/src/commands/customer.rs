//! # Customer Commands
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Customer Session                                     │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Idle    │────►│ Balance  │────►│ Purchase │────►│ Receipt  │       │
//! │  │ ($0.00)  │     │  > $0    │     │ attempt  │     │ + change │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │  insert_money    │ rejected: balance kept      │
//! │                        │                  ▼                             │
//! │                        └────────── refund ──────────► (back to idle)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use vend_core::{
    describe, CatalogItem, Money, PurchaseOutcome, StatisticsSnapshot, Transaction,
};

use super::normalize_code;
use crate::error::CliError;
use crate::state::{ConfigState, MachineState};

/// Product menu with the current balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub balance: Money,
    pub items: Vec<CatalogItem>,
    /// Products with at least one unit left.
    pub available: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub inserted: Money,
    pub balance: Money,
}

/// Receipt printed after a successful purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction: Transaction,
    pub description: String,
}

/// Result of selecting an item.
///
/// Rejections are normal responses with `dispensed: false`; the balance
/// is still in the machine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub code: String,
    pub dispensed: bool,
    pub message: String,
    pub change: Money,
    pub receipt: Option<Receipt>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub amount: Money,
}

/// Gets the product menu.
pub fn view_menu(machine: &MachineState) -> MenuResponse {
    debug!("view_menu command");
    machine.with_machine(|m| MenuResponse {
        balance: m.balance(),
        items: m.catalog_snapshot(),
        available: m.catalog().available().count(),
    })
}

/// Inserts money typed as a decimal amount (`1.50`, `$2`, `.25`).
///
/// ## Errors
/// - Unparseable text → `ValidationError`
/// - Zero or negative amount → `ValidationError` (balance unchanged)
pub fn insert_money(machine: &MachineState, input: &str) -> Result<DepositResponse, CliError> {
    debug!(input = %input, "insert_money command");

    let amount: Money = input
        .trim()
        .parse()
        .map_err(|_| CliError::validation("Please enter a valid number."))?;

    let balance = machine.with_machine_mut(|m| m.deposit(amount))?;
    Ok(DepositResponse {
        inserted: amount,
        balance,
    })
}

/// Attempts to buy the product under `code_input`.
///
/// ## Flow
/// ```text
/// code_input ──► trim + uppercase ──► lock ──► purchase ──► describe ──► unlock
///                                                 │
///                          Dispensed ─────────────┼──► message + receipt
///                          Rejected  ─────────────┴──► message only
/// ```
pub fn select_item(
    machine: &MachineState,
    config: &ConfigState,
    code_input: &str,
) -> Result<PurchaseResponse, CliError> {
    let code = normalize_code(code_input);
    debug!(code = %code, "select_item command");

    let (outcome, description) = machine.with_machine_mut(|m| {
        let outcome = m.purchase(&code)?;
        let description = m.catalog().lookup(&code).map(describe).unwrap_or_default();
        Ok::<_, CliError>((outcome, description))
    })?;

    let response = match outcome {
        PurchaseOutcome::Dispensed {
            change,
            transaction,
        } => PurchaseResponse {
            message: format!(
                "Dispensing {}. Your change is {}",
                transaction.product_name(),
                config.format_currency(change)
            ),
            code,
            dispensed: true,
            change,
            receipt: Some(Receipt {
                transaction,
                description,
            }),
        },
        PurchaseOutcome::Rejected(failure) => PurchaseResponse {
            message: failure.message(|amount| config.format_currency(amount)),
            code,
            dispensed: false,
            change: Money::zero(),
            receipt: None,
        },
    };

    Ok(response)
}

/// Gets the transaction statistics.
pub fn statistics(machine: &MachineState) -> StatisticsSnapshot {
    debug!("statistics command");
    machine.with_machine(|m| m.statistics())
}

/// Returns all inserted money.
pub fn refund(machine: &MachineState) -> RefundResponse {
    debug!("refund command");
    RefundResponse {
        amount: machine.with_machine_mut(|m| m.refund()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::seed::default_catalog;
    use vend_core::{TransactionStatus, VendingMachine};

    fn setup() -> (MachineState, ConfigState) {
        let machine = VendingMachine::new(default_catalog().unwrap());
        (MachineState::new(machine), ConfigState::default())
    }

    #[test]
    fn test_insert_money_parses_decimal() {
        let (machine, _) = setup();
        let response = insert_money(&machine, " 1.50 ").unwrap();
        assert_eq!(response.inserted.cents(), 150);

        let response = insert_money(&machine, "0.25").unwrap();
        assert_eq!(response.balance.cents(), 175);
    }

    #[test]
    fn test_insert_money_rejects_garbage_and_zero() {
        let (machine, _) = setup();

        let err = insert_money(&machine, "lots").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = insert_money(&machine, "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(view_menu(&machine).balance.is_zero());
    }

    #[test]
    fn test_select_item_dispenses_with_receipt() {
        let (machine, config) = setup();
        insert_money(&machine, "2").unwrap();

        let response = select_item(&machine, &config, " a1 ").unwrap();

        assert!(response.dispensed);
        assert_eq!(response.code, "A1");
        assert_eq!(response.message, "Dispensing Coca-Cola. Your change is $0.50");
        let receipt = response.receipt.unwrap();
        assert_eq!(receipt.description, "Carbonated soft drink");
        assert_eq!(receipt.transaction.status(), TransactionStatus::Success);
    }

    #[test]
    fn test_select_item_rejections_keep_balance() {
        let (machine, config) = setup();
        insert_money(&machine, "1").unwrap();

        let response = select_item(&machine, &config, "B3").unwrap();
        assert!(!response.dispensed);
        assert!(response.receipt.is_none());
        assert_eq!(
            response.message,
            "Insufficient funds. Grape Juice costs $2.25, but you only have $1.00"
        );

        let response = select_item(&machine, &config, "Z9").unwrap();
        assert_eq!(response.message, "Invalid product code: Z9");

        assert_eq!(view_menu(&machine).balance.cents(), 100);
        assert_eq!(statistics(&machine).total, 1);
    }

    #[test]
    fn test_insert_money_stops_at_balance_limit() {
        let (machine, _) = setup();
        insert_money(&machine, "999.99").unwrap();

        let err = insert_money(&machine, "0.02").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(insert_money(&machine, "92233720368547758.07").is_err());
        assert_eq!(view_menu(&machine).balance.cents(), 99_999);

        insert_money(&machine, "0.01").unwrap();
        assert_eq!(view_menu(&machine).balance.cents(), 100_000);
    }

    #[test]
    fn test_refund_empties_balance() {
        let (machine, _) = setup();
        insert_money(&machine, "5").unwrap();

        assert_eq!(refund(&machine).amount.cents(), 500);
        assert!(refund(&machine).amount.is_zero());
    }

    #[test]
    fn test_menu_lists_catalog_in_order() {
        let (machine, _) = setup();
        let menu = view_menu(&machine);
        assert_eq!(menu.items.len(), 9);
        assert_eq!(menu.items[0].code, "A1");
        assert_eq!(menu.items[8].code, "C2");
        assert_eq!(menu.available, 9);
    }

    #[test]
    fn test_menu_counts_sold_out_slots() {
        let (machine, config) = setup();
        for _ in 0..2 {
            insert_money(&machine, "2.25").unwrap();
            assert!(select_item(&machine, &config, "B3").unwrap().dispensed);
        }

        let menu = view_menu(&machine);
        assert_eq!(menu.available, 8);
        assert_eq!(menu.items.len(), 9);
    }
}
