//! CODA Parser CLI
//!
//! Parses one CODA statement file and writes its transaction list as CSV
//! to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- statement.cod > transactions.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use coda_parser::{lexer, parse_statement, ParseError, Result};
use log::debug;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(ParseError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let records = lexer::parse_records(BufReader::new(file))?;

    let statement = parse_statement(&records);
    debug!(
        "Statement for account {} ({}): opening balance {}, closing balance {}",
        statement.account.number,
        statement.account.currency,
        statement.initial_balance,
        statement.new_balance
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    statement.write_transactions_csv(handle)?;

    Ok(())
}
