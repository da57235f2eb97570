//! # CLI Error Types
//!
//! Unified error type for command handlers and the console.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Handling Flow                                  │
//! │                                                                         │
//! │  vend-core             seed                 console / commands          │
//! │  ─────────             ────                 ──────────────────          │
//! │  CoreError  ──┐                                                         │
//! │               ├──► CliError { code, message } ──► "[ERROR] message"     │
//! │  SeedError  ──┤                                                         │
//! │  io::Error  ──┘                             (fatal only for I/O)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected purchases are not errors; they come back as a normal
//! `PurchaseResponse` with `dispensed: false`.

use serde::Serialize;
use vend_core::{CoreError, ValidationError};

use crate::seed::SeedError;

/// Error returned from command handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Invalid amount: $0.00. Amount must be positive."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product code
    NotFound,

    /// User input could not be parsed or failed a rule
    ValidationError,

    /// Admin password rejected
    Unauthorized,

    /// Catalog file could not be read or parsed
    ConfigError,

    /// Internal fault (I/O, broken invariant)
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} {} not found!", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidAmount { .. }
            | CoreError::InvalidQuantity { .. }
            | CoreError::InvalidPrice { .. }
            | CoreError::BalanceLimit { .. }
            | CoreError::SlotFull { .. }
            | CoreError::Validation(_) => CliError::validation(err.to_string()),
            CoreError::ReserveFull => {
                tracing::warn!("Cash reserve full; sale refused");
                CliError::internal("Machine is full. Please ask an operator to cash out.")
            }
            CoreError::InternalConsistency { ref code, ref detail } => {
                // Log the detail but keep the customer message generic
                tracing::error!(code = %code, detail = %detail, "Machine fault");
                CliError::internal("Payment processing failed")
            }
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<SeedError> for CliError {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::Core(core) => CliError::from(core),
            other => CliError::new(ErrorCode::ConfigError, other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Console I/O failed: {}", err);
        CliError::internal(format!("Console I/O failed: {}", err))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use vend_core::Money;

    #[test]
    fn test_core_validation_maps_to_validation_code() {
        let err = CliError::from(CoreError::InvalidAmount {
            amount: Money::zero(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("must be positive"));
    }

    #[test]
    fn test_internal_fault_hides_detail() {
        let err = CliError::from(CoreError::InternalConsistency {
            code: "A1".to_string(),
            detail: "settle refused".to_string(),
        });
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Payment processing failed");
    }

    #[test]
    fn test_limits_map_to_validation_or_internal() {
        let err = CliError::from(CoreError::BalanceLimit {
            max: vend_core::MAX_BALANCE,
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("Balance cannot exceed $1000.00"));

        let err = CliError::from(CoreError::ReserveFull);
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(CliError::not_found("Item", "Z9")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Item Z9 not found!");
    }
}
