//! The ATM's account registry.
//!
//! Owns every account opened during the process lifetime, enforces the
//! creation and authentication policy, and hands out [`Session`]s bound to
//! a single account.

use crate::account::{is_valid_pin, Account};
use crate::amount::Amount;
use crate::error::{AtmError, Result};
use crate::session::{PinSource, Session};
use crate::transaction::AccountRecord;
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::Read;

/// PIN attempts allowed per authentication call.
pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// The ATM: all accounts plus the policy for opening and accessing them.
///
/// Accounts are never removed and an account number is never reassigned.
#[derive(Debug, Default)]
pub struct Registry {
    /// Accounts indexed by account number.
    accounts: HashMap<String, Account>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry {
            accounts: HashMap::new(),
        }
    }

    /// Opens a new account.
    ///
    /// Checks run in order: blank number, duplicate number, PIN format,
    /// negative balance. Nothing is stored unless every check passes.
    pub fn create_account(
        &mut self,
        number: &str,
        pin: &str,
        initial_balance: Amount,
    ) -> Result<&Account> {
        if number.trim().is_empty() {
            return Err(AtmError::EmptyIdentifier);
        }
        if self.accounts.contains_key(number) {
            return Err(AtmError::DuplicateAccount(number.to_string()));
        }
        if !is_valid_pin(pin) {
            return Err(AtmError::BadFormat);
        }
        if initial_balance.is_negative() {
            return Err(AtmError::NegativeBalance);
        }

        info!(
            "Opened account {} with balance {}",
            number, initial_balance
        );
        let account = Account::open(number.to_string(), pin.to_string(), initial_balance);
        Ok(self.accounts.entry(number.to_string()).or_insert(account))
    }

    /// Returns `true` if an account with this number exists.
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// Read-only access to an account.
    pub fn account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Number of open accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Authenticates against an account, pulling up to
    /// [`MAX_PIN_ATTEMPTS`] PINs from `pins`.
    ///
    /// The attempt counter lives only for this call: a lockout is not
    /// remembered, and the next call starts fresh.
    pub fn authenticate<P: PinSource>(
        &mut self,
        number: &str,
        pins: &mut P,
    ) -> Result<Session<'_>> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| AtmError::AccountNotFound(number.to_string()))?;

        for attempt in 1..=MAX_PIN_ATTEMPTS {
            let pin = pins.next_pin(attempt, MAX_PIN_ATTEMPTS)?;
            if account.validate_pin(&pin) {
                debug!("Account {} authenticated on attempt {}", number, attempt);
                return Ok(Session::new(account));
            }

            let remaining = MAX_PIN_ATTEMPTS - attempt;
            debug!(
                "Wrong PIN for account {}, {} attempt(s) remaining",
                number, remaining
            );
            if remaining > 0 {
                pins.rejected(remaining)?;
            }
        }

        warn!(
            "Account {}: {} wrong PIN attempts, access refused",
            number, MAX_PIN_ATTEMPTS
        );
        Err(AtmError::AuthLockout {
            attempts: MAX_PIN_ATTEMPTS,
        })
    }

    /// Seeds accounts from CSV rows of `account,pin,balance`.
    ///
    /// Each row goes through [`Registry::create_account`]. Rows that fail to
    /// parse or are rejected are logged at warn level and skipped. Returns
    /// the number of accounts opened.
    pub fn load_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut loaded = 0;
        for (row_idx, result) in csv_reader.deserialize::<AccountRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            let Some(balance) = record.opening_balance() else {
                warn!("Row {}: Invalid balance for account {}", row_num, record.account);
                continue;
            };

            match self.create_account(&record.account, &record.pin, balance) {
                Ok(_) => loaded += 1,
                Err(e) => warn!("Row {}: {}", row_num, e),
            }
        }

        Ok(loaded)
    }
}
