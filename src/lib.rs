//! # Mini ATM
//!
//! An in-memory ATM simulation: open accounts, authenticate with a PIN,
//! then deposit, withdraw, check the balance, read the transaction history
//! and change the PIN.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Strict invariants**: `balance == sum(transaction log)` always maintained
//! - **No I/O in the core**: every operation returns a typed [`Result`];
//!   printing lives in [`shell`]
//! - **Borrow-scoped sessions**: an authenticated [`Session`] holds the only
//!   mutable handle to its account
//!
//! ## Example
//!
//! ```
//! use mini_atm::{Amount, AtmError, PinSource, Registry, Result};
//! use std::str::FromStr;
//!
//! struct Typed(&'static str);
//!
//! impl PinSource for Typed {
//!     fn next_pin(&mut self, _attempt: u32, _max: u32) -> Result<String> {
//!         Ok(self.0.to_string())
//!     }
//! }
//!
//! let mut atm = Registry::new();
//! atm.create_account("1001", "1234", Amount::from_str("500").unwrap()).unwrap();
//!
//! let mut session = atm.authenticate("1001", &mut Typed("1234")).unwrap();
//! session.withdraw(Amount::from_str("300").unwrap()).unwrap();
//! assert_eq!(session.check_balance().to_string(), "200.00");
//!
//! assert!(matches!(
//!     session.withdraw(Amount::from_str("600").unwrap()),
//!     Err(AtmError::InsufficientFunds { .. })
//! ));
//! ```

pub mod account;
pub mod amount;
pub mod error;
pub mod registry;
pub mod session;
pub mod shell;
pub mod transaction;

pub use account::{Account, WITHDRAWAL_LIMIT};
pub use amount::Amount;
pub use error::{AtmError, Result};
pub use registry::{Registry, MAX_PIN_ATTEMPTS};
pub use session::{PinSource, Session};
pub use shell::Shell;
pub use transaction::{AccountRecord, TransactionRecord, TxKind};
