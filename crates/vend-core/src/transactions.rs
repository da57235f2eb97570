//! # Transaction Log
//!
//! Append-only record of every purchase attempt, plus derived statistics.
//!
//! ## Identifier Discipline
//! ```text
//! attempt 1  SUCCESS  ──► TXN-0001
//! attempt 2  FAILED   ──► TXN-0002   (failures consume ids too)
//! attempt 3  SUCCESS  ──► TXN-0003
//! ```
//! The counter lives on the log instance, so two machines (or two tests)
//! never share a sequence.

use chrono::Utc;
use tracing::{info, warn};

use crate::money::Money;
use crate::types::{StatisticsSnapshot, Transaction, TransactionId, TransactionStatus};

/// Append-only transaction history for one machine.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
    next_id: u64,
}

impl Default for TransactionLog {
    fn default() -> Self {
        TransactionLog {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog::default()
    }

    /// Records a completed sale and returns a copy of the stored record.
    pub fn record_success(
        &mut self,
        code: &str,
        name: &str,
        price: Money,
        amount_tendered: Money,
        change: Money,
    ) -> Transaction {
        let txn = self.append(
            code,
            name,
            price,
            amount_tendered,
            change,
            TransactionStatus::Success,
        );
        info!(
            id = %txn.id(),
            code,
            price = %price,
            tendered = %amount_tendered,
            change = %change,
            "sale recorded"
        );
        txn
    }

    /// Records a rejected attempt. Change is always zero.
    ///
    /// `reason` goes to the log output only; it is not part of the record.
    pub fn record_failure(
        &mut self,
        code: &str,
        name: &str,
        price: Money,
        amount_tendered: Money,
        reason: &str,
    ) -> Transaction {
        let txn = self.append(
            code,
            name,
            price,
            amount_tendered,
            Money::zero(),
            TransactionStatus::Failed,
        );
        warn!(id = %txn.id(), code, reason, "failed attempt recorded");
        txn
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    /// Successful records in insertion order.
    pub fn successful(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().filter(|t| t.is_success())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate counts, revenue and success rate.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{Money, TransactionLog};
    ///
    /// let mut log = TransactionLog::new();
    /// assert_eq!(log.statistics().success_rate_percent, 0.0);
    ///
    /// log.record_success("A1", "Coke", Money::from_cents(150), Money::from_cents(200), Money::from_cents(50));
    /// log.record_failure("A1", "Coke", Money::from_cents(150), Money::zero(), "Insufficient funds");
    ///
    /// let stats = log.statistics();
    /// assert_eq!(stats.total_revenue.cents(), 150);
    /// assert_eq!(stats.success_rate_percent, 50.0);
    /// ```
    pub fn statistics(&self) -> StatisticsSnapshot {
        let total = self.entries.len();
        let successful = self.successful().count();
        let total_revenue: Money = self.successful().map(|t| t.price()).sum();

        let success_rate_percent = if total == 0 {
            0.0
        } else {
            successful as f64 * 100.0 / total as f64
        };

        StatisticsSnapshot {
            total,
            successful,
            failed: total - successful,
            total_revenue,
            success_rate_percent,
        }
    }

    fn append(
        &mut self,
        code: &str,
        name: &str,
        price: Money,
        amount_tendered: Money,
        change: Money,
        status: TransactionStatus,
    ) -> Transaction {
        let id = TransactionId::new(self.next_id);
        self.next_id += 1;

        let txn = Transaction::new(
            id,
            Utc::now(),
            code,
            name,
            price,
            amount_tendered,
            change,
            status,
        );
        self.entries.push(txn.clone());
        txn
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
