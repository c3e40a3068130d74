//! Statement assembly: the top-level parse entry point.
//!
//! Pure aggregation over an already-decoded record sequence. Absent
//! optional sections (no identification, initial-state or new-state
//! record) are never errors; sentinel defaults are substituted.

use crate::decimal::Decimal3;
use crate::grouping::group_transactions;
use crate::record::{filter_by_kinds, first_of_kind, Record, RecordKind};
use crate::transaction::{eligible_groups, normalize_whitespace, Transaction};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::io::Write;

/// Default date substituted when a dated section is absent.
pub(crate) fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// The account a statement reports on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub number: String,
    pub currency: String,
    pub holder_name: String,
    pub bic: String,
}

/// One fully parsed CODA statement.
///
/// Immutable once assembled; owns everything beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub creation_date: NaiveDate,
    pub account: Account,

    /// Statement sequence number from the initial-state record.
    pub sequence_number: u32,

    /// Paper statement sequence number from the initial-state record.
    pub paper_sequence_number: u32,

    pub initial_balance: Decimal3,
    pub new_balance: Decimal3,
    pub new_date: NaiveDate,

    /// Free message accumulated from the statement's message records.
    pub informational_message: String,

    pub transactions: Vec<Transaction>,
}

impl Statement {
    /// Writes the transaction list as CSV.
    pub fn write_transactions_csv<W: Write>(&self, writer: W) -> crate::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "sequence",
            "detail",
            "value_date",
            "entry_date",
            "amount",
            "counterparty_name",
            "counterparty_account",
            "counterparty_bic",
            "message",
        ])?;

        for transaction in &self.transactions {
            csv_writer.write_record([
                transaction.sequence_number.to_string(),
                transaction.sequence_number_detail.to_string(),
                transaction.value_date.to_string(),
                transaction.entry_date.to_string(),
                transaction.amount.to_string(),
                transaction.counterparty_name.clone(),
                transaction.counterparty_account.clone(),
                transaction.counterparty_bic.clone(),
                transaction.message.clone(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Assembles one statement from the records of one CODA document.
///
/// Total over any record sequence: missing sections become defaults and
/// malformed sequencing yields some transaction list rather than an
/// error.
pub fn parse_statement(records: &[Record]) -> Statement {
    let mut creation_date = sentinel_date();
    if let Some(Record::Identification(identification)) =
        first_of_kind(records, RecordKind::Identification)
    {
        creation_date = identification.creation_date;
    }

    let mut initial_balance = Decimal3::ZERO;
    let mut sequence_number = 0;
    let mut paper_sequence_number = 0;
    if let Some(Record::InitialState(state)) = first_of_kind(records, RecordKind::InitialState) {
        initial_balance = state.balance;
        sequence_number = state.sequence_number;
        paper_sequence_number = state.paper_sequence_number;
    }

    let mut new_balance = Decimal3::ZERO;
    let mut new_date = sentinel_date();
    if let Some(Record::NewState(state)) = first_of_kind(records, RecordKind::NewState) {
        new_balance = state.balance;
        new_date = state.date;
    }

    let informational_message =
        assemble_message(&filter_by_kinds(records, &[RecordKind::Message]));

    let account = parse_account(records);

    let movement_records = filter_by_kinds(
        records,
        &[
            RecordKind::TransactionPart1,
            RecordKind::TransactionPart2,
            RecordKind::TransactionPart3,
            RecordKind::InformationPart1,
            RecordKind::InformationPart2,
            RecordKind::InformationPart3,
        ],
    );
    let groups = eligible_groups(group_transactions(&movement_records));
    let transactions: Vec<Transaction> = groups
        .iter()
        .filter_map(|group| Transaction::from_group(group))
        .collect();

    debug!(
        "Assembled statement: {} movement/information records, {} transactions",
        movement_records.len(),
        transactions.len()
    );

    Statement {
        creation_date,
        account,
        sequence_number,
        paper_sequence_number,
        initial_balance,
        new_balance,
        new_date,
        informational_message,
        transactions,
    }
}

/// Concatenates the statement's free message records in order.
fn assemble_message(records: &[&Record]) -> String {
    let mut text = String::new();
    for record in records {
        if let Record::Message(message) = record {
            text.push_str(&message.text);
        }
    }
    normalize_whitespace(&text)
}

/// Builds the account identity from the identification and initial-state
/// records; every field defaults to empty when its source is absent.
fn parse_account(records: &[Record]) -> Account {
    let mut holder_name = String::new();
    let mut bic = String::new();
    if let Some(Record::Identification(identification)) =
        first_of_kind(records, RecordKind::Identification)
    {
        holder_name = identification.account_holder_name.clone();
        bic = identification.bic.clone();
    }

    let mut number = String::new();
    let mut currency = String::new();
    if let Some(Record::InitialState(state)) = first_of_kind(records, RecordKind::InitialState) {
        let (account_number, account_currency) =
            split_account(state.account_structure, &state.account_and_currency);
        number = account_number;
        currency = account_currency;
        if holder_name.is_empty() {
            holder_name = state.account_holder_name.clone();
        }
    }

    Account {
        number,
        currency,
        holder_name,
        bic,
    }
}

/// Splits the 37-character account-and-currency zone.
///
/// Structure codes '2' and '3' use the IBAN layout (number in columns
/// 0-33, currency in 34-36); the domestic layouts put a 12-character
/// number first and the currency at columns 13-15.
fn split_account(structure: char, field: &str) -> (String, String) {
    let chars: Vec<char> = field.chars().collect();
    let slice = |start: usize, end: usize| -> String {
        chars[start.min(chars.len())..end.min(chars.len())]
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    };

    match structure {
        '2' | '3' => (slice(0, 34), slice(34, 37)),
        _ => (slice(0, 12), slice(13, 16)),
    }
}
