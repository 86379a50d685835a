//! Bank account model and operations.
//!
//! Maintains the invariant: `balance == sum(log amounts)` at all times.

use crate::amount::Amount;
use crate::error::{AtmError, Result};
use crate::transaction::{TransactionRecord, TxKind};
use log::debug;

/// Largest amount a single withdrawal may take out.
pub const WITHDRAWAL_LIMIT: Amount = Amount::units(1000);

/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

/// Returns `true` if `pin` is exactly four ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

/// A single customer's account.
///
/// # Invariants
///
/// - `balance` equals the sum of every signed amount in the log
/// - `balance` never drops below zero
/// - every successful mutation appends exactly one record; a failed one
///   changes nothing
///
/// Fields are private: accounts are opened through the
/// [`Registry`](crate::registry::Registry) and mutated only through the
/// operations below.
#[derive(Debug, Clone)]
pub struct Account {
    number: String,
    pin: String,
    balance: Amount,
    log: Vec<TransactionRecord>,
}

impl Account {
    /// Opens an account and records the opening balance.
    ///
    /// Callers are expected to have validated the PIN and balance.
    pub(crate) fn open(number: String, pin: String, balance: Amount) -> Self {
        Account {
            number,
            pin,
            balance,
            log: vec![TransactionRecord::now(TxKind::Created, balance)],
        }
    }

    /// The account number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns `true` if `entered` matches the stored PIN.
    pub fn validate_pin(&self, entered: &str) -> bool {
        self.pin == entered
    }

    /// Current balance.
    pub fn check_balance(&self) -> Amount {
        self.balance
    }

    /// Every log entry, oldest first.
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.log
    }

    /// Deposits funds into the account and returns the new balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<Amount> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount);
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::AmountTooLarge)?;
        self.record(TxKind::Deposit, amount);
        debug!("Deposited {} to account {}", amount, self.number);
        Ok(self.balance)
    }

    /// Withdraws funds and returns the new balance.
    ///
    /// Checks run in a fixed order, so a request above both the balance and
    /// [`WITHDRAWAL_LIMIT`] reports insufficient funds.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AtmError::InsufficientFunds {
                available: self.balance,
            });
        }
        if amount > WITHDRAWAL_LIMIT {
            return Err(AtmError::LimitExceeded {
                limit: WITHDRAWAL_LIMIT,
            });
        }

        self.balance -= amount;
        self.record(TxKind::Withdrawal, -amount);
        debug!("Withdrew {} from account {}", amount, self.number);
        Ok(self.balance)
    }

    /// Replaces the PIN after checking the old one and the new format.
    pub fn change_pin(&mut self, old_pin: &str, new_pin: &str) -> Result<()> {
        if !self.validate_pin(old_pin) {
            return Err(AtmError::WrongPin);
        }
        if !is_valid_pin(new_pin) {
            return Err(AtmError::BadFormat);
        }
        if new_pin == old_pin {
            return Err(AtmError::SamePin);
        }

        self.pin = new_pin.to_string();
        self.record(TxKind::PinChanged, Amount::ZERO);
        debug!("PIN changed for account {}", self.number);
        Ok(())
    }

    /// Up to `limit` most recent records, newest first.
    pub fn recent_transactions(&self, limit: usize) -> Vec<&TransactionRecord> {
        self.log.iter().rev().take(limit).collect()
    }

    /// Verifies the invariant: `balance == sum(log amounts)`.
    pub fn check_invariant(&self) -> bool {
        let logged: Amount = self.log.iter().map(|r| &r.amount).sum();
        logged == self.balance && !self.balance.is_negative()
    }

    fn record(&mut self, kind: TxKind, amount: Amount) {
        self.log.push(TransactionRecord::now(kind, amount));
        debug_assert!(self.check_invariant());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn account(balance: &str) -> Account {
        Account::open("1001".to_string(), "1234".to_string(), amt(balance))
    }

    #[test]
    fn test_pin_format() {
        assert!(is_valid_pin("0000"));
        assert!(is_valid_pin("9876"));
        assert!(!is_valid_pin("123"));
        assert!(!is_valid_pin("12345"));
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin(" 123"));
        assert!(!is_valid_pin("١٢٣٤"));
    }

    #[test]
    fn test_open_records_creation() {
        let acc = account("100");
        assert_eq!(acc.number(), "1001");
        assert_eq!(acc.check_balance().to_string(), "100.00");
        assert_eq!(acc.transactions().len(), 1);
        assert_eq!(acc.transactions()[0].kind, TxKind::Created);
        assert_eq!(acc.transactions()[0].amount.to_string(), "100.00");
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_open_with_zero_balance_still_logs() {
        let acc = account("0");
        assert_eq!(acc.transactions().len(), 1);
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_validate_pin() {
        let acc = account("0");
        assert!(acc.validate_pin("1234"));
        assert!(!acc.validate_pin("4321"));
        assert!(!acc.validate_pin(""));
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut acc = account("10");
        assert_eq!(acc.deposit(amt("5.25")).unwrap().to_string(), "15.25");
        assert_eq!(acc.transactions().len(), 2);
        assert_eq!(acc.transactions()[1].kind, TxKind::Deposit);
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut acc = account("10");
        assert!(matches!(acc.deposit(Amount::ZERO), Err(AtmError::InvalidAmount)));
        assert!(matches!(acc.deposit(amt("-1")), Err(AtmError::InvalidAmount)));
        assert_eq!(acc.check_balance().to_string(), "10.00");
        assert_eq!(acc.transactions().len(), 1);
    }

    #[test]
    fn test_deposit_overflow_leaves_account_untouched() {
        let max = "79228162514264337593543950335";
        let mut acc = account(max);
        assert!(matches!(acc.deposit(amt(max)), Err(AtmError::AmountTooLarge)));
        assert!(matches!(acc.deposit(amt("1")), Err(AtmError::AmountTooLarge)));
        assert_eq!(acc.check_balance(), amt(max));
        assert_eq!(acc.transactions().len(), 1);
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_withdraw_decreases_balance() {
        let mut acc = account("500");
        assert_eq!(acc.withdraw(amt("300")).unwrap().to_string(), "200.00");
        let last = acc.transactions().last().unwrap();
        assert_eq!(last.kind, TxKind::Withdrawal);
        assert_eq!(last.amount.to_string(), "-300.00");
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let mut acc = account("100");
        assert!(acc.withdraw(amt("100")).unwrap().is_zero());
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_withdraw_rejects_non_positive() {
        let mut acc = account("100");
        assert!(matches!(acc.withdraw(Amount::ZERO), Err(AtmError::InvalidAmount)));
        assert!(matches!(acc.withdraw(amt("-5")), Err(AtmError::InvalidAmount)));
    }

    #[test]
    fn test_insufficient_funds_checked_before_limit() {
        let mut acc = account("500");
        match acc.withdraw(amt("600")) {
            Err(AtmError::InsufficientFunds { available }) => {
                assert_eq!(available.to_string(), "500.00")
            }
            other => panic!("Expected InsufficientFunds, got {:?}", other),
        }

        let mut small = account("500");
        assert!(matches!(
            small.withdraw(amt("1500")),
            Err(AtmError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_limit_exceeded() {
        let mut acc = account("2000");
        assert!(matches!(
            acc.withdraw(amt("1500")),
            Err(AtmError::LimitExceeded { .. })
        ));
        assert!(matches!(
            acc.withdraw(amt("1000.01")),
            Err(AtmError::LimitExceeded { .. })
        ));
        assert_eq!(acc.check_balance().to_string(), "2000.00");
        assert_eq!(acc.transactions().len(), 1);

        assert_eq!(acc.withdraw(amt("1000")).unwrap().to_string(), "1000.00");
    }

    #[test]
    fn test_change_pin_check_order() {
        let mut acc = account("0");
        assert!(matches!(acc.change_pin("0000", "1234"), Err(AtmError::WrongPin)));
        assert!(matches!(acc.change_pin("0000", "12a4"), Err(AtmError::WrongPin)));
        assert!(matches!(acc.change_pin("1234", "12a4"), Err(AtmError::BadFormat)));
        assert!(matches!(acc.change_pin("1234", "123"), Err(AtmError::BadFormat)));
        assert!(matches!(acc.change_pin("1234", "1234"), Err(AtmError::SamePin)));
        assert_eq!(acc.transactions().len(), 1);
        assert!(acc.validate_pin("1234"));
    }

    #[test]
    fn test_change_pin_success() {
        let mut acc = account("50");
        acc.change_pin("1234", "5678").unwrap();
        assert!(acc.validate_pin("5678"));
        assert!(!acc.validate_pin("1234"));

        let last = acc.transactions().last().unwrap();
        assert_eq!(last.kind, TxKind::PinChanged);
        assert!(last.amount.is_zero());
        assert!(acc.check_invariant());
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let mut acc = account("100");
        acc.deposit(amt("50")).unwrap();
        acc.withdraw(amt("20")).unwrap();

        let recent = acc.recent_transactions(100);
        let kinds: Vec<TxKind> = recent.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TxKind::Withdrawal, TxKind::Deposit, TxKind::Created]);

        let two = acc.recent_transactions(2);
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].kind, TxKind::Withdrawal);

        assert!(acc.recent_transactions(0).is_empty());
    }
}
