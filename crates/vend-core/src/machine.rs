//! # Vending Machine (Purchase Coordinator)
//!
//! Coordinates the catalog, the payment backend, the transaction log and the
//! machine's cash reserve.
//!
//! ## Purchase State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      purchase(code)                                     │
//! │                                                                         │
//! │  Requested                                                              │
//! │     │                                                                   │
//! │     ├── 1. lookup(code) = None ─────────────► ProductUnknown  (no log)  │
//! │     │                                                                   │
//! │     ├── 2. !has_stock(code) ──► log FAILED ─► OutOfStock                │
//! │     │                                                                   │
//! │     ├── 3. balance < price ───► log FAILED ─► InsufficientFunds         │
//! │     │                                                                   │
//! │     ├── cash_reserve + price overflows ─────► Err(ReserveFull)          │
//! │     │                                                                   │
//! │     │   ── reads above, writes below ──                                 │
//! │     │                                                                   │
//! │     ├── 4. settle(price)       → change                                 │
//! │     ├── 5. decrement(code)                                              │
//! │     ├── 6. cash_reserve += price                                        │
//! │     └── 7. log SUCCESS ───────────────────► Settled (Dispensed)         │
//! │                                                                         │
//! │  Every state is terminal. Nothing is retried.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Balance settles before stock moves, and only for an item already confirmed
//! in stock. Rejections leave balance and stock exactly as they were.
//!
//! Every `Err` except a step-5 consistency fault is raised before step 4, so
//! an error leaves the machine untouched. A step-5 fault cannot happen with
//! [`Catalog`] under `&mut self`; if it ever did, the settled balance stays
//! spent (see [`CoreError::InternalConsistency`]).
//!
//! ## Concurrency
//! Every mutating method takes `&mut self`, so a purchase runs start to
//! finish without interleaving. An embedding that shares a machine across
//! threads must hold one lock around the whole call.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::payment::{CashPayment, PaymentBackend};
use crate::transactions::TransactionLog;
use crate::types::{CatalogItem, Product, StatisticsSnapshot, Transaction};

const REASON_OUT_OF_STOCK: &str = "Out of stock";
const REASON_INSUFFICIENT_FUNDS: &str = "Insufficient funds";

// =============================================================================
// Purchase Outcome
// =============================================================================

/// Kind of a rejected purchase, without the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    ProductUnknown,
    OutOfStock,
    InsufficientFunds,
}

/// Why a purchase was rejected.
///
/// These are expected business outcomes, returned as values. The machine
/// stays fully usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseFailure {
    /// No product under this code. Nothing was recorded.
    ProductUnknown { code: String },

    /// The product exists but its slot is empty.
    OutOfStock {
        name: String,
        transaction: Transaction,
    },

    /// The balance does not cover the price.
    InsufficientFunds {
        name: String,
        price: Money,
        balance: Money,
        /// `price - balance`, always positive.
        shortfall: Money,
        transaction: Transaction,
    },
}

impl PurchaseFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            PurchaseFailure::ProductUnknown { .. } => FailureKind::ProductUnknown,
            PurchaseFailure::OutOfStock { .. } => FailureKind::OutOfStock,
            PurchaseFailure::InsufficientFunds { .. } => FailureKind::InsufficientFunds,
        }
    }

    /// The FAILED record written for this attempt, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            PurchaseFailure::ProductUnknown { .. } => None,
            PurchaseFailure::OutOfStock { transaction, .. }
            | PurchaseFailure::InsufficientFunds { transaction, .. } => Some(transaction),
        }
    }

    /// Customer-facing text, with amounts rendered by `money`.
    ///
    /// ```rust
    /// use vend_core::PurchaseFailure;
    ///
    /// let failure = PurchaseFailure::ProductUnknown { code: "Z9".into() };
    /// assert_eq!(failure.message(|m| m.to_string()), "Invalid product code: Z9");
    /// ```
    pub fn message(&self, money: impl Fn(Money) -> String) -> String {
        match self {
            PurchaseFailure::ProductUnknown { code } => format!("Invalid product code: {}", code),
            PurchaseFailure::OutOfStock { name, .. } => format!("{} is out of stock", name),
            PurchaseFailure::InsufficientFunds {
                name,
                price,
                balance,
                ..
            } => format!(
                "Insufficient funds. {} costs {}, but you only have {}",
                name,
                money(*price),
                money(*balance)
            ),
        }
    }
}

/// [`PurchaseFailure::message`] with `$` amounts, for logs.
impl fmt::Display for PurchaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(|m| m.to_string()))
    }
}

/// Result of one call to [`VendingMachine::purchase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The item was vended.
    Dispensed {
        change: Money,
        transaction: Transaction,
    },
    /// The item was not vended; balance and stock are unchanged.
    Rejected(PurchaseFailure),
}

impl PurchaseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Dispensed { .. })
    }

    /// Change handed back; zero for rejections.
    pub fn change(&self) -> Money {
        match self {
            PurchaseOutcome::Dispensed { change, .. } => *change,
            PurchaseOutcome::Rejected(_) => Money::zero(),
        }
    }

    /// The record written for this attempt (SUCCESS or FAILED), if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            PurchaseOutcome::Dispensed { transaction, .. } => Some(transaction),
            PurchaseOutcome::Rejected(failure) => failure.transaction(),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            PurchaseOutcome::Dispensed { .. } => None,
            PurchaseOutcome::Rejected(failure) => Some(failure.kind()),
        }
    }

    /// Missing amount, for insufficient-funds rejections only.
    pub fn shortfall(&self) -> Option<Money> {
        match self {
            PurchaseOutcome::Rejected(PurchaseFailure::InsufficientFunds { shortfall, .. }) => {
                Some(*shortfall)
            }
            _ => None,
        }
    }
}

// =============================================================================
// Vending Machine
// =============================================================================

/// The purchase coordinator.
///
/// Generic over the payment backend; cash is the default.
#[derive(Debug, Clone)]
pub struct VendingMachine<P: PaymentBackend = CashPayment> {
    catalog: Catalog,
    payment: P,
    log: TransactionLog,
    cash_reserve: Money,
}

impl VendingMachine<CashPayment> {
    /// Creates a cash machine over a pre-populated catalog.
    pub fn new(catalog: Catalog) -> Self {
        VendingMachine::with_payment(catalog, CashPayment::new())
    }
}

impl<P: PaymentBackend> VendingMachine<P> {
    /// Creates a machine with a specific payment backend.
    pub fn with_payment(catalog: Catalog, payment: P) -> Self {
        VendingMachine {
            catalog,
            payment,
            log: TransactionLog::new(),
            cash_reserve: Money::zero(),
        }
    }

    // -------------------------------------------------------------------------
    // Customer operations
    // -------------------------------------------------------------------------

    /// Inserts money and returns the new balance.
    ///
    /// ## Errors
    /// `CoreError::InvalidAmount` for zero or negative amounts; the balance
    /// is unchanged.
    pub fn deposit(&mut self, amount: Money) -> CoreResult<Money> {
        let balance = self.payment.deposit(amount)?;
        info!(amount = %amount, balance = %balance, backend = self.payment.name(), "deposit");
        Ok(balance)
    }

    /// Attempts to vend the product under `code`.
    ///
    /// `code` is matched exactly; product codes are stored upper-case.
    ///
    /// ## Returns
    /// - `Ok(Dispensed)` on success
    /// - `Ok(Rejected(..))` for unknown product, empty slot, or low balance
    /// - `Err(CoreError::ReserveFull)` when the cash box cannot record the
    ///   takings; nothing has moved
    /// - `Err(CoreError::InternalConsistency)` only if a collaborator broke
    ///   its contract mid-purchase (a bug, never a customer outcome)
    pub fn purchase(&mut self, code: &str) -> CoreResult<PurchaseOutcome> {
        debug!(code, "purchase requested");

        // 1. Identify the product
        let (name, price) = match self.catalog.lookup(code) {
            Some(product) => (product.name().to_string(), product.price()),
            None => {
                warn!(code, "purchase rejected: unknown product");
                return Ok(PurchaseOutcome::Rejected(PurchaseFailure::ProductUnknown {
                    code: code.to_string(),
                }));
            }
        };

        let balance = self.payment.balance();

        // 2. Stock
        if !self.catalog.has_stock(code) {
            let transaction =
                self.log
                    .record_failure(code, &name, price, balance, REASON_OUT_OF_STOCK);
            return Ok(PurchaseOutcome::Rejected(PurchaseFailure::OutOfStock {
                name,
                transaction,
            }));
        }

        // 3. Funds
        if balance < price {
            let transaction =
                self.log
                    .record_failure(code, &name, price, balance, REASON_INSUFFICIENT_FUNDS);
            return Ok(PurchaseOutcome::Rejected(
                PurchaseFailure::InsufficientFunds {
                    name,
                    price,
                    balance,
                    shortfall: price - balance,
                    transaction,
                },
            ));
        }

        let takings = self
            .cash_reserve
            .checked_add(price)
            .ok_or(CoreError::ReserveFull)?;

        // 4. Settle
        let change = match self.payment.settle(price) {
            Some(change) => change,
            None => {
                error!(code, price = %price, balance = %balance, "settle refused a covered price");
                return Err(CoreError::InternalConsistency {
                    code: code.to_string(),
                    detail: format!(
                        "{} backend refused to settle {} against balance {}",
                        self.payment.name(),
                        price,
                        balance
                    ),
                });
            }
        };

        // 5. Stock out
        if !self.catalog.decrement(code) {
            error!(code, "decrement failed after stock check");
            return Err(CoreError::InternalConsistency {
                code: code.to_string(),
                detail: "slot emptied between stock check and dispense".to_string(),
            });
        }

        // 6. Takings
        self.cash_reserve = takings;

        // 7. Record
        let transaction = self
            .log
            .record_success(code, &name, price, price + change, change);

        info!(
            id = %transaction.id(),
            code,
            change = %change,
            remaining = self.catalog.stock_level(code),
            "dispensed"
        );

        Ok(PurchaseOutcome::Dispensed {
            change,
            transaction,
        })
    }

    /// Returns all inserted money and resets the balance.
    pub fn refund(&mut self) -> Money {
        let amount = self.payment.drain();
        if amount.is_positive() {
            info!(amount = %amount, "refund");
        }
        amount
    }

    // -------------------------------------------------------------------------
    // Operator operations
    // -------------------------------------------------------------------------

    /// Empties the cash reserve and returns what it held.
    pub fn cash_out(&mut self) -> Money {
        let amount = std::mem::take(&mut self.cash_reserve);
        info!(amount = %amount, "cash out");
        amount
    }

    /// Loads a product into the catalog (replacing any existing slot).
    pub fn add_product(&mut self, product: Product, quantity: i64) -> CoreResult<()> {
        let code = product.code().to_string();
        self.catalog.add_product(product, quantity)?;
        info!(code = %code, quantity, "product added");
        Ok(())
    }

    /// Adds stock to an existing product. `Ok(false)` for unknown codes.
    pub fn restock(&mut self, code: &str, quantity: i64) -> CoreResult<bool> {
        let restocked = self.catalog.restock(code, quantity)?;
        if restocked {
            info!(code, quantity, now = self.catalog.stock_level(code), "restocked");
        }
        Ok(restocked)
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// Money the current customer has inserted.
    pub fn balance(&self) -> Money {
        self.payment.balance()
    }

    /// Machine takings since the last cash-out.
    pub fn cash_reserve(&self) -> Money {
        self.cash_reserve
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        self.log.statistics()
    }

    /// Ordered display copy of the catalog.
    pub fn catalog_snapshot(&self) -> Vec<CatalogItem> {
        self.catalog.snapshot()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.log.all()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn payment(&self) -> &P {
        &self.payment
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use crate::{MAX_BALANCE, MAX_PRICE};

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    /// A1 @ 1.50 x2, B1 @ 2.00 x3
    fn machine() -> VendingMachine {
        let mut catalog = Catalog::new();
        catalog
            .add_product(Product::soda("A1", "Coke", cents(150), false).unwrap(), 2)
            .unwrap();
        catalog
            .add_product(
                Product::juice("B1", "Orange Juice", cents(200), "Orange").unwrap(),
                3,
            )
            .unwrap();
        VendingMachine::new(catalog)
    }

    #[test]
    fn test_successful_purchase_returns_change() {
        let mut vm = machine();
        vm.deposit(cents(200)).unwrap();

        let outcome = vm.purchase("A1").unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.change(), cents(50));
        assert_eq!(outcome.failure_kind(), None);
        assert_eq!(vm.catalog().stock_level("A1"), 1);
        assert_eq!(vm.cash_reserve(), cents(150));
        assert!(vm.balance().is_zero());

        let txn = outcome.transaction().unwrap();
        assert_eq!(txn.status(), TransactionStatus::Success);
        assert_eq!(txn.price(), cents(150));
        assert_eq!(txn.amount_tendered(), cents(200));
        assert_eq!(txn.change(), txn.amount_tendered() - txn.price());
    }

    #[test]
    fn test_insufficient_funds_without_deposit() {
        let mut vm = machine();

        let outcome = vm.purchase("A1").unwrap();

        assert_eq!(outcome.failure_kind(), Some(FailureKind::InsufficientFunds));
        assert_eq!(outcome.shortfall(), Some(cents(150)));
        assert_eq!(vm.catalog().stock_level("A1"), 2);
        assert!(vm.balance().is_zero());
        assert_eq!(vm.transactions().len(), 1);
        assert_eq!(vm.transactions()[0].status(), TransactionStatus::Failed);
        assert!(vm.cash_reserve().is_zero());
    }

    #[test]
    fn test_insufficient_funds_keeps_partial_balance() {
        let mut vm = machine();
        vm.deposit(cents(100)).unwrap();

        let outcome = vm.purchase("A1").unwrap();

        assert_eq!(outcome.shortfall(), Some(cents(50)));
        assert_eq!(vm.balance(), cents(100));
        assert_eq!(outcome.transaction().unwrap().amount_tendered(), cents(100));
        assert!(outcome.change().is_zero());
    }

    #[test]
    fn test_out_of_stock_after_depletion() {
        let mut vm = machine();
        for _ in 0..2 {
            vm.deposit(cents(150)).unwrap();
            assert!(vm.purchase("A1").unwrap().is_success());
        }
        assert_eq!(vm.catalog().stock_level("A1"), 0);

        vm.deposit(cents(150)).unwrap();
        let outcome = vm.purchase("A1").unwrap();

        assert_eq!(outcome.failure_kind(), Some(FailureKind::OutOfStock));
        assert_eq!(vm.balance(), cents(150));
        assert_eq!(vm.catalog().stock_level("A1"), 0);
        assert_eq!(vm.cash_reserve(), cents(300));
        assert_eq!(vm.transactions().len(), 3);
    }

    #[test]
    fn test_refund_returns_balance() {
        let mut vm = machine();
        vm.deposit(cents(500)).unwrap();

        assert_eq!(vm.refund(), cents(500));
        assert!(vm.balance().is_zero());
        assert!(vm.refund().is_zero());
    }

    #[test]
    fn test_unknown_product_records_nothing() {
        let mut vm = machine();
        vm.deposit(cents(500)).unwrap();

        let outcome = vm.purchase("Z9").unwrap();

        assert_eq!(outcome.failure_kind(), Some(FailureKind::ProductUnknown));
        assert!(outcome.transaction().is_none());
        assert_eq!(vm.balance(), cents(500));
        assert!(vm.transactions().is_empty());
    }

    #[test]
    fn test_statistics_after_mixed_purchases() {
        let mut vm = machine();
        vm.deposit(cents(150)).unwrap();
        vm.purchase("A1").unwrap();
        vm.deposit(cents(200)).unwrap();
        vm.purchase("B1").unwrap();
        vm.purchase("B1").unwrap();

        let stats = vm.statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.successful, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total_revenue, cents(350));
        assert!((stats.success_rate_percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut vm = machine();
        vm.deposit(cents(100)).unwrap();

        assert!(matches!(
            vm.deposit(Money::zero()),
            Err(CoreError::InvalidAmount { .. })
        ));
        assert_eq!(vm.balance(), cents(100));
    }

    #[test]
    fn test_cash_out_drains_reserve() {
        let mut vm = machine();
        vm.deposit(cents(500)).unwrap();
        vm.purchase("A1").unwrap();
        vm.deposit(cents(500)).unwrap();
        vm.purchase("B1").unwrap();

        assert_eq!(vm.cash_out(), cents(350));
        assert!(vm.cash_reserve().is_zero());
        assert!(vm.cash_out().is_zero());

        vm.deposit(cents(300)).unwrap();
        vm.purchase("B1").unwrap();
        assert_eq!(vm.cash_reserve(), cents(200));
    }

    #[test]
    fn test_reserve_counts_price_not_tendered() {
        let mut vm = machine();
        vm.deposit(cents(1000)).unwrap();
        let outcome = vm.purchase("A1").unwrap();

        assert_eq!(outcome.change(), cents(850));
        assert_eq!(vm.cash_reserve(), cents(150));
    }

    #[test]
    fn test_exact_change_purchase() {
        let mut vm = machine();
        vm.deposit(cents(200)).unwrap();
        let outcome = vm.purchase("B1").unwrap();

        assert!(outcome.is_success());
        assert!(outcome.change().is_zero());
    }

    #[test]
    fn test_restock_and_add_product() {
        let mut vm = machine();
        assert!(vm.restock("A1", 3).unwrap());
        assert_eq!(vm.catalog().stock_level("A1"), 5);
        assert!(!vm.restock("Z9", 3).unwrap());
        assert!(vm.restock("A1", -1).is_err());

        vm.add_product(Product::water("C1", "Spring Water", cents(100), false).unwrap(), 10)
            .unwrap();
        let codes: Vec<_> = vm.catalog_snapshot().into_iter().map(|i| i.code).collect();
        assert_eq!(codes, vec!["A1", "B1", "C1"]);
        assert!(vm
            .add_product(Product::water("C2", "Fizz", cents(125), true).unwrap(), -1)
            .is_err());
    }

    #[test]
    fn test_failure_messages() {
        let mut vm = machine();
        let outcome = vm.purchase("A1").unwrap();
        match outcome {
            PurchaseOutcome::Rejected(failure) => assert_eq!(
                failure.to_string(),
                "Insufficient funds. Coke costs $1.50, but you only have $0.00"
            ),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let outcome = vm.purchase("Z9").unwrap();
        match outcome {
            PurchaseOutcome::Rejected(failure) => {
                assert_eq!(failure.to_string(), "Invalid product code: Z9")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_failure_message_uses_given_currency() {
        let mut vm = machine();
        vm.deposit(cents(100)).unwrap();
        let PurchaseOutcome::Rejected(failure) = vm.purchase("B1").unwrap() else {
            panic!("B1 should be refused at $1.00");
        };

        let euros = failure.message(|m| format!("€{}.{:02}", m.dollars(), m.cents_part()));
        assert_eq!(
            euros,
            "Insufficient funds. Orange Juice costs €2.00, but you only have €1.00"
        );
    }

    #[test]
    fn test_extreme_amounts_are_refused_up_front() {
        assert!(Product::soda("A9", "Gold Cola", Money::from_cents(i64::MAX), false).is_err());

        let mut vm = machine();
        assert!(matches!(
            vm.deposit(Money::from_cents(i64::MAX)),
            Err(CoreError::BalanceLimit { .. })
        ));
        assert!(vm.balance().is_zero());
        assert!(vm.restock("A1", i64::MAX).is_err());
        assert_eq!(vm.catalog().stock_level("A1"), 2);
    }

    #[test]
    fn test_top_price_sells_repeatedly() {
        let mut vm = machine();
        vm.add_product(Product::soda("A9", "Gold Cola", MAX_PRICE, false).unwrap(), 2)
            .unwrap();

        for _ in 0..2 {
            vm.deposit(MAX_BALANCE).unwrap();
            assert!(vm.purchase("A9").unwrap().is_success());
        }

        assert_eq!(vm.cash_reserve().cents(), 2 * MAX_PRICE.cents());
        assert_eq!(vm.statistics().total_revenue.cents(), 2 * MAX_PRICE.cents());
        assert_eq!(vm.catalog().stock_level("A9"), 0);
    }

    #[test]
    fn test_full_reserve_refuses_sale_without_side_effects() {
        let mut vm = machine();
        vm.cash_reserve = Money::from_cents(i64::MAX - 100);
        vm.deposit(cents(200)).unwrap();

        let err = vm.purchase("A1").unwrap_err();

        assert!(matches!(err, CoreError::ReserveFull));
        assert_eq!(vm.balance(), cents(200));
        assert_eq!(vm.catalog().stock_level("A1"), 2);
        assert!(vm.transactions().is_empty());

        vm.cash_out();
        assert!(vm.purchase("A1").unwrap().is_success());
    }

    /// Takes deposits like cash but refuses every settle.
    #[derive(Debug, Default)]
    struct RefusingCash(CashPayment);

    impl PaymentBackend for RefusingCash {
        fn name(&self) -> &'static str {
            "refusing"
        }
        fn deposit(&mut self, amount: Money) -> CoreResult<Money> {
            self.0.deposit(amount)
        }
        fn balance(&self) -> Money {
            self.0.balance()
        }
        fn settle(&mut self, _price: Money) -> Option<Money> {
            None
        }
        fn drain(&mut self) -> Money {
            self.0.drain()
        }
    }

    #[test]
    fn test_settle_fault_leaves_balance_refundable() {
        let mut catalog = Catalog::new();
        catalog
            .add_product(Product::soda("A1", "Coke", cents(150), false).unwrap(), 2)
            .unwrap();
        let mut vm = VendingMachine::with_payment(catalog, RefusingCash::default());
        vm.deposit(cents(200)).unwrap();

        assert!(matches!(
            vm.purchase("A1"),
            Err(CoreError::InternalConsistency { .. })
        ));
        assert_eq!(vm.catalog().stock_level("A1"), 2);
        assert!(vm.transactions().is_empty());
        assert_eq!(vm.refund(), cents(200));
    }

    /// Claims to have funds but never settles.
    #[derive(Debug, Default)]
    struct StuckBackend;

    impl PaymentBackend for StuckBackend {
        fn name(&self) -> &'static str {
            "stuck"
        }
        fn deposit(&mut self, amount: Money) -> CoreResult<Money> {
            Ok(amount)
        }
        fn balance(&self) -> Money {
            Money::from_cents(10_000)
        }
        fn settle(&mut self, _price: Money) -> Option<Money> {
            None
        }
        fn drain(&mut self) -> Money {
            Money::zero()
        }
    }

    #[test]
    fn test_broken_backend_is_an_internal_fault() {
        let mut catalog = Catalog::new();
        catalog
            .add_product(Product::soda("A1", "Coke", cents(150), false).unwrap(), 2)
            .unwrap();
        let mut vm = VendingMachine::with_payment(catalog, StuckBackend);

        let err = vm.purchase("A1").unwrap_err();

        assert!(matches!(err, CoreError::InternalConsistency { .. }));
        assert_eq!(vm.catalog().stock_level("A1"), 2);
        assert!(vm.cash_reserve().is_zero());
        assert!(vm.transactions().is_empty());
        assert_eq!(vm.payment().name(), "stuck");
    }
}
