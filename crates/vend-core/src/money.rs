//! # Money
//!
//! Every amount the machine touches (coins in the slot, shelf prices,
//! change handed back, the cash box) is a whole number of cents.
//!
//! ## Cash Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   coin slot ──► balance ──┬──► price  ──► cash reserve                  │
//! │                           │                                             │
//! │                           └──► change ──► customer                      │
//! │                                                                         │
//! │   tendered == price + change, in cents, for every sale                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Typed amounts such as `"1.50"` are parsed digit by digit, so `"0.10"`
//! and `"0.20"` add up to exactly `"0.30"`.
//!
//! ```rust
//! use vend_core::money::Money;
//!
//! let tendered: Money = "2.00".parse().unwrap();
//! let price = Money::from_cents(150);
//! assert_eq!(tendered - price, Money::from_cents(50));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::error::ValidationError;

const CENTS_PER_DOLLAR: i64 = 100;

/// An amount of cash in cents.
///
/// Signed so that a typed `-5` parses and is then refused by
/// [`deposit`](crate::VendingMachine::deposit) with a proper error.
/// Serializes as a bare integer: `{"price": 150}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / CENTS_PER_DOLLAR
    }

    /// Cents past the whole dollar, without sign (`-$5.50` gives 50).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_DOLLAR).abs()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` when the running balance would overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Parsing typed amounts
// =============================================================================

/// Reads what a customer or operator typed at the prompt.
///
/// ```text
/// "2"   → 200     "$1.50" → 150     ".75" → 75
/// "2.5" → 250     "0.05"  → 5       "-1"  → -100
/// ```
/// A third decimal place is refused: the coin slot has no half cents.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let bad = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(bad("expected a number such as 1.50"));
        }
        if fraction.len() > 2 {
            return Err(bad("at most two decimal places"));
        }

        let dollars = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .map_err(|_| bad("amount is too large"))?
        };
        // "5" after the point means fifty cents
        let cents = format!("{:0<2}", fraction)
            .parse::<i64>()
            .map_err(|_| bad("bad cents"))?;

        let total = dollars
            .checked_mul(CENTS_PER_DOLLAR)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(|| bad("amount is too large"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Formatting and Arithmetic
// =============================================================================

/// `$1.50` style, for logs. The CLI uses its configured symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

/// Revenue totals over sold transactions. Pins at `i64::MAX` cents rather
/// than wrapping.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.fold(0i64, |total, m| total.saturating_add(m.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &str) -> i64 {
        input.parse::<Money>().unwrap().cents()
    }

    #[test]
    fn test_dollars_and_cents_split() {
        let juice = Money::from_cents(225);
        assert_eq!(juice.dollars(), 2);
        assert_eq!(juice.cents_part(), 25);

        let owed = Money::from_cents(-75);
        assert_eq!(owed.dollars(), 0);
        assert_eq!(owed.cents_part(), 75);
    }

    #[test]
    fn test_display_for_shelf_labels() {
        assert_eq!(Money::from_cents(125).to_string(), "$1.25");
        assert_eq!(Money::from_cents(300).to_string(), "$3.00");
        assert_eq!(Money::from_cents(10).to_string(), "$0.10");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-75).to_string(), "-$0.75");
    }

    #[test]
    fn test_change_is_exact() {
        let tendered = Money::from_cents(typed("0.10") + typed("0.20"));
        assert_eq!(tendered, "0.30".parse::<Money>().unwrap());

        let change = Money::from_cents(500) - Money::from_cents(225);
        assert_eq!(change.cents(), 275);

        let mut reserve = Money::zero();
        reserve += Money::from_cents(150);
        reserve += Money::from_cents(225);
        assert_eq!(reserve.cents(), 375);
    }

    #[test]
    fn test_revenue_sum() {
        let sales = vec![Money::from_cents(150), Money::from_cents(100), Money::from_cents(225)];
        assert_eq!(sales.into_iter().sum::<Money>().cents(), 475);
        assert!(std::iter::empty::<Money>().sum::<Money>().is_zero());

        let huge = [Money::from_cents(i64::MAX), Money::from_cents(1)];
        assert_eq!(huge.into_iter().sum::<Money>().cents(), i64::MAX);
    }

    #[test]
    fn test_typed_amounts() {
        assert_eq!(typed("5"), 500);
        assert_eq!(typed("1.5"), 150);
        assert_eq!(typed("1.05"), 105);
        assert_eq!(typed("$2.25"), 225);
        assert_eq!(typed("  0.25\n"), 25);
        assert_eq!(typed(".5"), 50);
        assert_eq!(typed("4."), 400);
        assert_eq!(typed("0"), 0);
        assert_eq!(typed("-2"), -200);
    }

    #[test]
    fn test_typed_garbage_is_refused() {
        assert!(matches!(
            "   ".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        for input in ["two", "0.125", "2,50", ".", "-", "1e2", "$-1", "1.2.3"] {
            assert!(input.parse::<Money>().is_err(), "{input:?} should not parse");
        }
        assert!("92233720368547758.08".parse::<Money>().is_err());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::default().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_cents(5).is_positive());
        assert!(Money::from_cents(-5).is_negative());
    }

    #[test]
    fn test_checked_add_guards_balance() {
        let balance = Money::from_cents(i64::MAX - 10);
        assert_eq!(balance.checked_add(Money::from_cents(10)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(balance.checked_add(Money::from_cents(11)), None);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(150)).unwrap();
        assert_eq!(json, "150");
        let back: Money = serde_json::from_str("225").unwrap();
        assert_eq!(back.cents(), 225);
    }
}
