//! Error types for the ATM.

use crate::amount::Amount;
use thiserror::Error;

/// Result type alias for ATM operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur while operating the ATM.
///
/// Everything above `Io` is an expected business outcome that the shell
/// reports and recovers from.
#[derive(Error, Debug)]
pub enum AtmError {
    /// Deposit or withdrawal amount was zero or negative
    #[error("Invalid amount. Must be greater than $0.")]
    InvalidAmount,

    /// Deposit would push the balance past the largest representable amount
    #[error("Amount too large. The balance cannot hold this deposit.")]
    AmountTooLarge,

    /// Withdrawal larger than the current balance
    #[error("Insufficient funds. Available balance: ${available}")]
    InsufficientFunds { available: Amount },

    /// Withdrawal larger than the per-transaction cap
    #[error("Withdrawal limit exceeded. Maximum: ${limit} per transaction.")]
    LimitExceeded { limit: Amount },

    /// Old PIN did not match during a PIN change
    #[error("Incorrect old PIN.")]
    WrongPin,

    /// PIN is not exactly four ASCII digits
    #[error("PIN must be exactly 4 digits.")]
    BadFormat,

    /// New PIN equals the old one
    #[error("New PIN must be different from old PIN.")]
    SamePin,

    /// Account number was blank
    #[error("Account number cannot be empty.")]
    EmptyIdentifier,

    /// Account number is already taken
    #[error("Account number {0} already exists. Please choose a different one.")]
    DuplicateAccount(String),

    /// Opening balance below zero
    #[error("Initial deposit cannot be negative.")]
    NegativeBalance,

    /// No account with the given number
    #[error("Account {0} not found.")]
    AccountNotFound(String),

    /// Every PIN attempt of one authentication call was wrong
    #[error("Maximum attempts ({attempts}) exceeded. Account locked.")]
    AuthLockout { attempts: u32 },

    /// Failed to read or write the console or a seed file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in a seed file
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Could not install the Ctrl-C handler
    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Input stream ended while a value was expected
    #[error("Input closed")]
    InputClosed,
}

impl AtmError {
    /// Returns `true` for expected business outcomes the shell reports and
    /// moves past, `false` for I/O and input failures.
    pub fn is_business(&self) -> bool {
        !matches!(
            self,
            AtmError::Io(_) | AtmError::Csv(_) | AtmError::Signal(_) | AtmError::InputClosed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_are_recoverable() {
        assert!(AtmError::InvalidAmount.is_business());
        assert!(AtmError::AuthLockout { attempts: 3 }.is_business());
        assert!(AtmError::DuplicateAccount("A1".to_string()).is_business());
        assert!(!AtmError::InputClosed.is_business());
        assert!(!AtmError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")).is_business());
    }

    #[test]
    fn test_messages_carry_amounts() {
        let err = AtmError::InsufficientFunds {
            available: Amount::units(500),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds. Available balance: $500.00"
        );

        let err = AtmError::LimitExceeded {
            limit: Amount::units(1000),
        };
        assert_eq!(
            err.to_string(),
            "Withdrawal limit exceeded. Maximum: $1000.00 per transaction."
        );
    }
}
