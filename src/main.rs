//! Mini ATM CLI
//!
//! Interactive console ATM. Accounts live only for the life of the process.
//!
//! # Usage
//!
//! ```bash
//! cargo run                      # start with no accounts
//! cargo run -- accounts.csv      # pre-open accounts from account,pin,balance rows
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::info;
use mini_atm::shell::write_interrupted;
use mini_atm::{Registry, Result, Shell};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: An unexpected error occurred: {}", e);
        eprintln!("Please restart the program.");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Ctrl-C arrives while the shell blocks in read_line; say goodbye and leave.
    ctrlc::set_handler(|| {
        let _ = write_interrupted(&mut io::stdout());
        process::exit(0);
    })?;

    let mut atm = Registry::new();

    if let Some(seed_path) = env::args().nth(1) {
        let file = File::open(&seed_path)?;
        let loaded = atm.load_csv(BufReader::new(file))?;
        info!("Loaded {} account(s) from {}", loaded, seed_path);
    }

    // stdout stays unlocked between writes so the Ctrl-C handler can print.
    let stdin = io::stdin();
    Shell::new(stdin.lock(), io::stdout()).run(&mut atm)
}
