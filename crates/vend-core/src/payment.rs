//! # Payment Backends
//!
//! The balance ledger: money the current customer has put into the machine.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  deposit(amount)  amount <= 0 ──► Err(InvalidAmount), balance untouched │
//! │                   over limit ──► Err(BalanceLimit), balance untouched   │
//! │                   otherwise  ──► balance += amount                      │
//! │                                                                         │
//! │  settle(price)    balance < price ──► None, balance untouched           │
//! │                   otherwise       ──► Some(balance - price), balance=0  │
//! │                                                                         │
//! │  drain()          ──► returns balance, balance = 0   (refund)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! `settle` takes `&mut self`, so no caller can observe the balance between
//! the change being computed and the balance being cleared.
//!
//! Cash is the only backend shipped. Card or token backends implement the
//! same trait and plug into [`crate::machine::VendingMachine`] unchanged.

use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_balance, validate_deposit_amount};
use crate::MAX_BALANCE;

/// A source of customer funds for the current session.
pub trait PaymentBackend {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Adds funds and returns the new balance.
    fn deposit(&mut self, amount: Money) -> CoreResult<Money>;

    /// Funds currently available to spend.
    fn balance(&self) -> Money;

    /// Consumes the whole balance against `price`, returning the change.
    ///
    /// Returns `None` and leaves the balance untouched if it does not cover
    /// the price.
    fn settle(&mut self, price: Money) -> Option<Money>;

    /// Returns the whole balance and resets it to zero.
    fn drain(&mut self) -> Money;
}

/// Coin-slot payments.
#[derive(Debug, Clone, Default)]
pub struct CashPayment {
    balance: Money,
}

impl CashPayment {
    pub fn new() -> Self {
        CashPayment::default()
    }
}

impl PaymentBackend for CashPayment {
    fn name(&self) -> &'static str {
        "cash"
    }

    fn deposit(&mut self, amount: Money) -> CoreResult<Money> {
        validate_deposit_amount(amount).map_err(|err| match err {
            ValidationError::TooLarge { .. } => CoreError::BalanceLimit { max: MAX_BALANCE },
            _ => CoreError::InvalidAmount { amount },
        })?;

        self.balance = self
            .balance
            .checked_add(amount)
            .filter(|balance| validate_balance(*balance).is_ok())
            .ok_or(CoreError::BalanceLimit { max: MAX_BALANCE })?;

        debug!(amount = %amount, balance = %self.balance, "cash deposited");
        Ok(self.balance)
    }

    fn balance(&self) -> Money {
        self.balance
    }

    fn settle(&mut self, price: Money) -> Option<Money> {
        if self.balance < price {
            return None;
        }

        let change = self.balance - price;
        self.balance = Money::zero();
        Some(change)
    }

    fn drain(&mut self) -> Money {
        std::mem::take(&mut self.balance)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
