//! # CODA Parser
//!
//! A parser for Belgian CODA bank statement files producing a structured
//! [`Statement`] per document: account identity, opening and closing
//! balances, free-text messages, and the ordered transaction list.
//!
//! ## Design Principles
//!
//! - **Closed record model**: the ten line kinds are a closed enum;
//!   grouping predicates pattern-match on variants
//! - **Total core**: transaction grouping and statement assembly never
//!   fail; only the fixed-width lexer returns errors
//! - **Exact money**: amounts use 3-decimal fixed point via `rust_decimal`
//! - **Single pass**: one top-to-bottom pass per document, no shared state
//!
//! ## Example
//!
//! ```no_run
//! use coda_parser::{lexer, parse_statement};
//! use std::io::BufReader;
//!
//! let file = std::fs::File::open("statement.cod").unwrap();
//! let records = lexer::parse_records(BufReader::new(file)).unwrap();
//! let statement = parse_statement(&records);
//! println!("{} transactions", statement.transactions.len());
//! ```

pub mod decimal;
pub mod error;
pub mod grouping;
pub mod lexer;
pub mod record;
pub mod statement;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_support;

pub use decimal::Decimal3;
pub use error::{ParseError, Result};
pub use grouping::group_transactions;
pub use record::{Record, RecordKind, TransactionCode};
pub use statement::{parse_statement, Account, Statement};
pub use transaction::Transaction;
