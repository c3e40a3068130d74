//! Typed record model for decoded CODA lines.
//!
//! Each of the ten parse-relevant line kinds is a closed variant of
//! [`Record`]. Only `TransactionPart1` and `InformationPart1` carry a
//! [`TransactionCode`], and only the `TransactionPart1` code participates
//! in grouping decisions.

use crate::decimal::Decimal3;
use chrono::NaiveDate;
use serde::Serialize;

/// Tag identifying a record kind, used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Identification,
    InitialState,
    NewState,
    Message,
    TransactionPart1,
    TransactionPart2,
    TransactionPart3,
    InformationPart1,
    InformationPart2,
    InformationPart3,
}

/// The 8-character transaction code carried on movement and information
/// part-1 records.
///
/// Two of its fields drive the grouping boundary rule:
/// `operation == "07"` marks a collective transaction, and
/// `transaction_type` in `'5'..='7'` marks a totalized-detail transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionCode {
    /// Transaction type digit (1 character).
    pub transaction_type: char,

    /// Family code (2 characters).
    pub family: String,

    /// Operation code (2 characters).
    pub operation: String,

    /// Category code (3 characters).
    pub category: String,
}

impl TransactionCode {
    /// `true` for collective transactions (operation `"07"`), whose
    /// stacked sub-lines each form a separate logical transaction.
    pub fn is_collective(&self) -> bool {
        self.operation == "07"
    }

    /// `true` for totalized-detail transactions (type `'5'`, `'6'` or
    /// `'7'`), which follow the same detail-ordinal splitting rule as
    /// collective transactions.
    pub fn is_totalized_detail(&self) -> bool {
        matches!(self.transaction_type, '5' | '6' | '7')
    }
}

/// Identification record ('0'): opens the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    pub creation_date: NaiveDate,
    pub bank_id: String,
    pub is_duplicate: bool,
    pub file_reference: String,
    pub account_holder_name: String,
    pub bic: String,
}

/// Initial state record ('1'): opening balance and account identity.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialState {
    /// Account structure digit; selects the layout of `account_and_currency`.
    pub account_structure: char,
    pub paper_sequence_number: u32,
    pub account_and_currency: String,
    pub balance: Decimal3,
    pub date: NaiveDate,
    pub account_holder_name: String,
    pub sequence_number: u32,
}

/// New state record ('8'): closing balance.
#[derive(Debug, Clone, PartialEq)]
pub struct NewState {
    pub sequence_number: u32,
    pub balance: Decimal3,
    pub date: NaiveDate,
}

/// Free message record ('4').
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub text: String,
}

/// Movement record, part 1 ('2'/'1'): the only record kind whose
/// transaction code participates in grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPart1 {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub bank_reference: String,
    pub amount: Decimal3,
    pub value_date: NaiveDate,
    pub transaction_code: TransactionCode,
    pub structured: bool,
    pub communication: String,
    pub entry_date: NaiveDate,
    pub statement_number: String,
    pub globalisation_code: char,
}

/// Movement record, part 2 ('2'/'2').
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPart2 {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub communication: String,
    pub customer_reference: String,
    pub counterparty_bic: String,
}

/// Movement record, part 3 ('2'/'3').
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPart3 {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub counterparty_account: String,
    pub counterparty_name: String,
    pub communication: String,
}

/// Information record, part 1 ('3'/'1').
#[derive(Debug, Clone, PartialEq)]
pub struct InformationPart1 {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub bank_reference: String,
    pub transaction_code: TransactionCode,
    pub structured: bool,
    pub communication: String,
}

/// Information record, part 2 ('3'/'2').
#[derive(Debug, Clone, PartialEq)]
pub struct InformationPart2 {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub communication: String,
}

/// Information record, part 3 ('3'/'3').
#[derive(Debug, Clone, PartialEq)]
pub struct InformationPart3 {
    pub sequence_number: u32,
    pub sequence_number_detail: u32,
    pub communication: String,
}

/// A decoded CODA line.
///
/// Closed over the known kinds: adding a kind is a breaking change and
/// every consumer match is revisited, which is acceptable for an
/// externally standardized, closed format.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Identification(Identification),
    InitialState(InitialState),
    NewState(NewState),
    Message(Message),
    TransactionPart1(TransactionPart1),
    TransactionPart2(TransactionPart2),
    TransactionPart3(TransactionPart3),
    InformationPart1(InformationPart1),
    InformationPart2(InformationPart2),
    InformationPart3(InformationPart3),
}

impl Record {
    /// Returns the kind tag for this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Identification(_) => RecordKind::Identification,
            Record::InitialState(_) => RecordKind::InitialState,
            Record::NewState(_) => RecordKind::NewState,
            Record::Message(_) => RecordKind::Message,
            Record::TransactionPart1(_) => RecordKind::TransactionPart1,
            Record::TransactionPart2(_) => RecordKind::TransactionPart2,
            Record::TransactionPart3(_) => RecordKind::TransactionPart3,
            Record::InformationPart1(_) => RecordKind::InformationPart1,
            Record::InformationPart2(_) => RecordKind::InformationPart2,
            Record::InformationPart3(_) => RecordKind::InformationPart3,
        }
    }

    /// Top-level transaction ordinal, present on movement, information
    /// and message records.
    pub fn sequence_number(&self) -> Option<u32> {
        match self {
            Record::Message(r) => Some(r.sequence_number),
            Record::TransactionPart1(r) => Some(r.sequence_number),
            Record::TransactionPart2(r) => Some(r.sequence_number),
            Record::TransactionPart3(r) => Some(r.sequence_number),
            Record::InformationPart1(r) => Some(r.sequence_number),
            Record::InformationPart2(r) => Some(r.sequence_number),
            Record::InformationPart3(r) => Some(r.sequence_number),
            _ => None,
        }
    }

    /// Detail ordinal distinguishing stacked lines within a collective
    /// or totalized-detail transaction.
    pub fn sequence_number_detail(&self) -> Option<u32> {
        match self {
            Record::Message(r) => Some(r.sequence_number_detail),
            Record::TransactionPart1(r) => Some(r.sequence_number_detail),
            Record::TransactionPart2(r) => Some(r.sequence_number_detail),
            Record::TransactionPart3(r) => Some(r.sequence_number_detail),
            Record::InformationPart1(r) => Some(r.sequence_number_detail),
            Record::InformationPart2(r) => Some(r.sequence_number_detail),
            Record::InformationPart3(r) => Some(r.sequence_number_detail),
            _ => None,
        }
    }

    /// The transaction code as seen by the grouping engine.
    ///
    /// Deliberately `Some` only for part-1 movement records: information
    /// part-1 records carry a code on the wire, but they never open a
    /// collective or totalized-detail boundary.
    pub fn transaction_code(&self) -> Option<&TransactionCode> {
        match self {
            Record::TransactionPart1(r) => Some(&r.transaction_code),
            _ => None,
        }
    }
}

/// Stable filter: the subsequence of `records` whose kind is in `kinds`,
/// in original order.
pub fn filter_by_kinds<'a>(records: &'a [Record], kinds: &[RecordKind]) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| kinds.contains(&record.kind()))
        .collect()
}

/// First record of the given kind, or `None`. Absence is a valid outcome,
/// not an error (e.g. a statement without a new-balance line).
pub fn first_of_kind(records: &[Record], kind: RecordKind) -> Option<&Record> {
    records.iter().find(|record| record.kind() == kind)
}
