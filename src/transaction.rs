//! Transaction log entries and the raw seed-file record.

use crate::amount::Amount;
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Kind of event captured by a [`TransactionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// Account opened with its initial balance.
    Created,

    /// Funds credited to the account.
    Deposit,

    /// Funds debited from the account.
    Withdrawal,

    /// PIN replaced. Carries a zero amount.
    PinChanged,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Created => "Account created",
            TxKind::Deposit => "Deposit",
            TxKind::Withdrawal => "Withdrawal",
            TxKind::PinChanged => "PIN changed",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable entry in an account's transaction log.
///
/// `amount` is signed: positive for credits, negative for debits and zero
/// for events that do not move money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub timestamp: DateTime<Local>,
    pub kind: TxKind,
    pub amount: Amount,
}

impl TransactionRecord {
    /// Creates a record stamped with the current local time.
    pub fn now(kind: TxKind, amount: Amount) -> Self {
        TransactionRecord {
            timestamp: Local::now(),
            kind,
            amount,
        }
    }
}

/// Raw account row as read from a seed CSV file.
///
/// Columns are `account,pin,balance`; the balance may be left empty, which
/// opens the account with zero funds.
#[derive(Debug, Deserialize)]
pub struct AccountRecord {
    pub account: String,

    pub pin: String,

    pub balance: Option<String>,
}

impl AccountRecord {
    /// Parses the balance column.
    ///
    /// Returns `None` if the column holds something other than a number.
    pub fn opening_balance(&self) -> Option<Amount> {
        match self.balance.as_deref().map(str::trim) {
            None | Some("") => Some(Amount::ZERO),
            Some(raw) => Amount::from_str(raw).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(balance: Option<&str>) -> AccountRecord {
        AccountRecord {
            account: "1001".to_string(),
            pin: "1234".to_string(),
            balance: balance.map(str::to_string),
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TxKind::Created.to_string(), "Account created");
        assert_eq!(TxKind::Deposit.to_string(), "Deposit");
        assert_eq!(TxKind::Withdrawal.to_string(), "Withdrawal");
        assert_eq!(TxKind::PinChanged.to_string(), "PIN changed");
    }

    #[test]
    fn test_record_now_keeps_amount_and_kind() {
        let amount = Amount::from_str("-20").unwrap();
        let rec = TransactionRecord::now(TxKind::Withdrawal, amount);
        assert_eq!(rec.kind, TxKind::Withdrawal);
        assert_eq!(rec.amount.to_string(), "-20.00");
        assert!(rec.timestamp <= Local::now());
    }

    #[test]
    fn test_opening_balance_parses_value() {
        let balance = record(Some(" 250.5 ")).opening_balance().unwrap();
        assert_eq!(balance.to_string(), "250.50");
    }

    #[test]
    fn test_opening_balance_defaults_to_zero() {
        assert_eq!(record(None).opening_balance(), Some(Amount::ZERO));
        assert_eq!(record(Some("  ")).opening_balance(), Some(Amount::ZERO));
    }

    #[test]
    fn test_opening_balance_rejects_garbage() {
        assert!(record(Some("lots")).opening_balance().is_none());
    }
}
