//! Text menu front end.
//!
//! Reads one line per prompt, parses it into a typed request, calls the
//! [`Registry`] or the active [`Session`], and prints the outcome. All
//! console formatting lives here; the core never prints.

use crate::account::{is_valid_pin, PIN_LENGTH};
use crate::amount::Amount;
use crate::error::{AtmError, Result};
use crate::registry::Registry;
use crate::session::{PinSource, Session};
use crate::transaction::TransactionRecord;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Records shown when the history prompt is left blank or unparsable.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

const RULE_WIDTH: usize = 60;

/// Parses a user-entered amount. `None` for anything that is not a number.
pub fn parse_amount(input: &str) -> Option<Amount> {
    Amount::from_str(input).ok()
}

/// Parses the history limit, falling back to [`DEFAULT_HISTORY_LIMIT`].
pub fn parse_limit(input: &str) -> usize {
    input.trim().parse().unwrap_or(DEFAULT_HISTORY_LIMIT)
}

/// Describes why `pin` failed the format check, completing "PIN ...".
pub fn pin_format_problem(pin: &str) -> &'static str {
    if pin.chars().count() != PIN_LENGTH {
        "must be exactly 4 digits."
    } else {
        "must contain only numbers."
    }
}

/// Writes the farewell shown when the user abandons the program mid-prompt.
pub fn write_interrupted<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n\nProgram interrupted by user.")?;
    writeln!(out, "Goodbye!")?;
    out.flush()
}

/// Formats one history line, e.g. `2024-01-31 09:15:00 | Deposit: +$50.00`.
pub fn format_record(record: &TransactionRecord) -> String {
    let sign = if record.amount.is_negative() { "" } else { "+" };
    format!(
        "{} | {}: {}${}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.kind,
        sign,
        record.amount
    )
}

/// Interactive console session over any line reader and writer.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    /// Runs the main menu until the user exits or input ends.
    ///
    /// End of input is treated as the user walking away and ends the program
    /// with a farewell rather than an error.
    pub fn run(&mut self, atm: &mut Registry) -> Result<()> {
        self.banner("WELCOME TO MINI ATM MACHINE")?;

        match self.main_menu(atm) {
            Ok(()) => {
                self.banner_lines(&["Thank you for using Mini ATM Machine!", "Have a great day!"])
            }
            Err(AtmError::InputClosed) => {
                write_interrupted(&mut self.output)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn main_menu(&mut self, atm: &mut Registry) -> Result<()> {
        loop {
            self.menu(
                "MAIN MENU",
                &["Create New Account", "Access Existing Account", "Exit"],
            )?;

            match self.prompt("Choose an option (1-3): ")?.as_str() {
                "1" => self.create_account(atm)?,
                "2" => self.access_account(atm)?,
                "3" => return Ok(()),
                _ => self.say("X Invalid option. Please choose 1-3.")?,
            }
        }
    }

    fn create_account(&mut self, atm: &mut Registry) -> Result<()> {
        self.banner("CREATE NEW ACCOUNT")?;

        let number = self.prompt("Enter new account number: ")?;
        if number.is_empty() {
            return self.fail(&AtmError::EmptyIdentifier);
        }
        if atm.contains(&number) {
            return self.fail(&AtmError::DuplicateAccount(number));
        }

        let pin = self.prompt("Set a 4-digit PIN: ")?;
        if !is_valid_pin(&pin) {
            return self.say(&format!("X PIN {}", pin_format_problem(&pin)));
        }

        let balance = loop {
            let raw = self.prompt("Enter initial deposit amount (minimum $0): $")?;
            match parse_amount(&raw) {
                None => self.say("X Invalid amount. Please enter a valid number.")?,
                Some(amount) if amount.is_negative() => self.fail(&AtmError::NegativeBalance)?,
                Some(amount) => break amount,
            }
        };

        let created = atm
            .create_account(&number, &pin, balance)
            .map(|account| (account.number().to_string(), account.check_balance()));
        if let Some((number, balance)) = self.report(created)? {
            self.say("Account created successfully!")?;
            writeln!(self.output, "   Account Number: {}", number)?;
            writeln!(self.output, "   Initial Balance: ${}", balance)?;
        }
        Ok(())
    }

    fn access_account(&mut self, atm: &mut Registry) -> Result<()> {
        self.banner("ACCOUNT LOGIN")?;

        let number = self.prompt("Enter account number: ")?;
        let authenticated = atm.authenticate(&number, &mut ConsolePins(&mut *self));
        if let Some(session) = self.report(authenticated)? {
            self.say("Authentication successful!")?;
            self.account_menu(session)?;
        }
        Ok(())
    }

    fn account_menu(&mut self, mut session: Session<'_>) -> Result<()> {
        loop {
            self.menu(
                "ATM MENU",
                &[
                    "Check Balance",
                    "Deposit Money",
                    "Withdraw Money",
                    "View Transaction History",
                    "Change PIN",
                    "Logout",
                ],
            )?;

            match self.prompt("Choose an option (1-6): ")?.as_str() {
                "1" => {
                    writeln!(self.output, "\n Current Balance: ${}", session.check_balance())?;
                }
                "2" => {
                    let raw = self.prompt("Enter deposit amount: $")?;
                    let Some(amount) = self.read_amount(&raw)? else {
                        continue;
                    };
                    if let Some(balance) = self.report(session.deposit(amount))? {
                        writeln!(self.output, "Deposited: ${}", amount)?;
                        writeln!(self.output, "New Balance: ${}", balance)?;
                    }
                }
                "3" => {
                    let raw = self.prompt("Enter withdrawal amount: $")?;
                    let Some(amount) = self.read_amount(&raw)? else {
                        continue;
                    };
                    if let Some(balance) = self.report(session.withdraw(amount))? {
                        writeln!(self.output, "Withdrew: ${}", amount)?;
                        writeln!(self.output, "New Balance: ${}", balance)?;
                    }
                }
                "4" => {
                    let raw = self.prompt("How many transactions to show? (default 5): ")?;
                    let limit = parse_limit(&raw);
                    self.history(&session.recent_transactions(limit))?;
                }
                "5" => {
                    let old_pin = self.prompt("Enter old PIN: ")?;
                    let new_pin = self.prompt("Enter new 4-digit PIN: ")?;
                    match session.change_pin(&old_pin, &new_pin) {
                        Err(AtmError::BadFormat) => {
                            self.say(&format!("X New PIN {}", pin_format_problem(&new_pin)))?
                        }
                        changed => {
                            if self.report(changed)?.is_some() {
                                self.say("PIN successfully changed.")?;
                            }
                        }
                    }
                }
                "6" => {
                    session.logout();
                    return self.say("Logged out successfully.");
                }
                _ => self.say("X Invalid option. Please choose 1-6.")?,
            }
        }
    }

    fn history(&mut self, records: &[&TransactionRecord]) -> Result<()> {
        writeln!(
            self.output,
            "\n Transaction History (Last {} transactions):",
            records.len()
        )?;
        self.rule('-')?;

        if records.is_empty() {
            return self.say("No transactions yet.");
        }
        for record in records {
            writeln!(self.output, "  {}", format_record(record))?;
        }
        self.rule('-')
    }

    fn read_amount(&mut self, raw: &str) -> Result<Option<Amount>> {
        let amount = parse_amount(raw);
        if amount.is_none() {
            self.say("X Invalid amount. Please enter a valid number.")?;
        }
        Ok(amount)
    }

    /// Prints business errors and turns them into `None`; anything else
    /// propagates.
    fn report<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_business() => {
                self.fail(&e)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AtmError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn fail(&mut self, error: &AtmError) -> Result<()> {
        writeln!(self.output, "X {}", error)?;
        Ok(())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn menu(&mut self, title: &str, options: &[&str]) -> Result<()> {
        self.banner(title)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        self.rule('=')
    }

    fn banner(&mut self, title: &str) -> Result<()> {
        self.banner_lines(&[title])
    }

    fn banner_lines(&mut self, lines: &[&str]) -> Result<()> {
        writeln!(self.output)?;
        self.rule('=')?;
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        self.rule('=')
    }

    fn rule(&mut self, c: char) -> Result<()> {
        writeln!(self.output, "{}", c.to_string().repeat(RULE_WIDTH))?;
        Ok(())
    }
}

/// Prompts for PIN attempts on the shell's console.
struct ConsolePins<'s, R, W>(&'s mut Shell<R, W>);

impl<R: BufRead, W: Write> PinSource for ConsolePins<'_, R, W> {
    fn next_pin(&mut self, attempt: u32, max_attempts: u32) -> Result<String> {
        self.0
            .prompt(&format!("Enter PIN (Attempt {}/{}): ", attempt, max_attempts))
    }

    fn rejected(&mut self, remaining: u32) -> Result<()> {
        writeln!(
            self.0.output,
            "X Incorrect PIN. {} attempt(s) remaining.",
            remaining
        )?;
        Ok(())
    }
}
