//! Authenticated access to a single account.

use crate::account::Account;
use crate::amount::Amount;
use crate::error::Result;
use crate::transaction::TransactionRecord;
use log::debug;

/// Supplies PIN attempts to [`Registry::authenticate`](crate::Registry::authenticate).
pub trait PinSource {
    /// Returns the PIN for attempt `attempt` (1-based) of `max_attempts`.
    fn next_pin(&mut self, attempt: u32, max_attempts: u32) -> Result<String>;

    /// Called after a wrong PIN while attempts remain.
    fn rejected(&mut self, _remaining: u32) -> Result<()> {
        Ok(())
    }
}

/// An authenticated session.
///
/// Holds the only mutable borrow of the account until [`Session::logout`]
/// or drop, so nothing else can touch the account meanwhile.
#[derive(Debug)]
pub struct Session<'a> {
    account: &'a mut Account,
}

impl<'a> Session<'a> {
    pub(crate) fn new(account: &'a mut Account) -> Self {
        Session { account }
    }

    pub fn account_number(&self) -> &str {
        self.account.number()
    }

    pub fn check_balance(&self) -> Amount {
        self.account.check_balance()
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<Amount> {
        self.account.deposit(amount)
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount> {
        self.account.withdraw(amount)
    }

    pub fn change_pin(&mut self, old_pin: &str, new_pin: &str) -> Result<()> {
        self.account.change_pin(old_pin, new_pin)
    }

    pub fn recent_transactions(&self, limit: usize) -> Vec<&TransactionRecord> {
        self.account.recent_transactions(limit)
    }

    /// Ends the session and releases the account.
    pub fn logout(self) {
        debug!("Account {} logged out", self.account.number());
    }
}
