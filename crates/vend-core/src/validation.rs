//! # Validation
//!
//! Rules for what may go into a slot label, a product name, a price tag
//! and the coin slot. Typed text is parsed first (see
//! [`Money`]'s `FromStr`); these checks run on the parsed values before the
//! catalog or payment backend changes anything.
//!
//! ```rust
//! use vend_core::validation::{validate_product_code, validate_stock_quantity};
//!
//! assert!(validate_product_code("A1").is_ok());
//! assert!(validate_product_code("A-1").is_err());
//! assert!(validate_stock_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_BALANCE, MAX_PRICE, MAX_PRODUCT_CODE_LEN, MAX_PRODUCT_NAME_LEN, MAX_STOCK};

pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::Required {
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Slot labels like `A1` or `C12`: letters and digits, up to
/// [`MAX_PRODUCT_CODE_LEN`] characters. Surrounding whitespace is ignored.
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    required("code", code)?;
    let code = code.trim();

    if code.len() > MAX_PRODUCT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_PRODUCT_CODE_LEN,
        });
    }
    if let Some(bad) = code.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: format!("unexpected character {:?}; use letters and digits", bad),
        });
    }
    Ok(())
}

/// Names are counted in characters, so "Jus d'Orange Pressé" fits the same
/// way its ASCII spelling would.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name)?;
    if name.trim().chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }
    Ok(())
}

/// Free items (price zero) are allowed, up to [`MAX_PRICE`].
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_PRICE.to_string(),
        });
    }
    Ok(())
}

/// A single coin-slot insertion. Positive, and never more than the slot
/// could hold on its own.
pub fn validate_deposit_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    validate_balance(amount)
}

/// The running balance after a deposit.
pub fn validate_balance(balance: Money) -> ValidationResult<()> {
    if balance > MAX_BALANCE {
        return Err(ValidationError::TooLarge {
            field: "balance".to_string(),
            max: MAX_BALANCE.to_string(),
        });
    }
    Ok(())
}

/// Initial stock, restock deltas and resulting slot levels. Zero is a
/// valid (empty) slot.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_STOCK {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_STOCK.to_string(),
        });
    }
    Ok(())
}
