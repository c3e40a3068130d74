//! Transaction assembly from grouped records.
//!
//! Consumes the grouping engine's output: each group is the contiguous
//! run of records belonging to one logical transaction. Groups without a
//! part-1 movement record (orphan information runs from malformed input)
//! carry no amount and are filtered out before assembly.

use crate::decimal::Decimal3;
use crate::record::{Record, RecordKind, TransactionCode};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// One logical transaction assembled from a record group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Top-level ordinal of the transaction within the statement.
    pub sequence_number: u32,

    /// Detail ordinal; non-zero for sub-lines of collective and
    /// totalized-detail transactions.
    pub sequence_number_detail: u32,

    /// Bank-assigned reference from the part-1 record.
    pub bank_reference: String,

    /// Signed amount; negative for debits.
    pub amount: Decimal3,

    pub value_date: NaiveDate,
    pub entry_date: NaiveDate,

    pub transaction_code: TransactionCode,

    /// Whether the communication uses a structured format.
    pub structured: bool,

    pub counterparty_name: String,
    pub counterparty_account: String,
    pub counterparty_bic: String,

    /// Free text accumulated from the movement and information parts,
    /// whitespace-normalized.
    pub message: String,
}

impl Transaction {
    /// Assembles a transaction from one group.
    ///
    /// Returns `None` when the group has no part-1 movement record to
    /// take the amount, dates and code from.
    pub fn from_group(group: &[&Record]) -> Option<Transaction> {
        let part_1 = group.iter().find_map(|record| match record {
            Record::TransactionPart1(part) => Some(part),
            _ => None,
        })?;

        let mut counterparty_name = String::new();
        let mut counterparty_account = String::new();
        let mut counterparty_bic = String::new();
        let mut message_parts = String::new();

        for record in group {
            match record {
                Record::TransactionPart1(part) => {
                    message_parts.push_str(&part.communication);
                }
                Record::TransactionPart2(part) => {
                    message_parts.push_str(&part.communication);
                    if counterparty_bic.is_empty() {
                        counterparty_bic = part.counterparty_bic.clone();
                    }
                }
                Record::TransactionPart3(part) => {
                    message_parts.push_str(&part.communication);
                    if counterparty_name.is_empty() {
                        counterparty_name = part.counterparty_name.clone();
                    }
                    if counterparty_account.is_empty() {
                        counterparty_account = part.counterparty_account.clone();
                    }
                }
                Record::InformationPart1(part) => message_parts.push_str(&part.communication),
                Record::InformationPart2(part) => message_parts.push_str(&part.communication),
                Record::InformationPart3(part) => message_parts.push_str(&part.communication),
                _ => {}
            }
        }

        Some(Transaction {
            sequence_number: part_1.sequence_number,
            sequence_number_detail: part_1.sequence_number_detail,
            bank_reference: part_1.bank_reference.clone(),
            amount: part_1.amount,
            value_date: part_1.value_date,
            entry_date: part_1.entry_date,
            transaction_code: part_1.transaction_code.clone(),
            structured: part_1.structured,
            counterparty_name,
            counterparty_account,
            counterparty_bic,
            message: normalize_whitespace(&message_parts),
        })
    }
}

/// Narrows the grouping engine's output to the groups eligible for
/// assembly, in the same relative order.
///
/// A group is eligible iff it contains at least one part-1 movement
/// record; orphan information-only groups are dropped here.
pub fn eligible_groups<'a>(groups: Vec<Vec<&'a Record>>) -> Vec<Vec<&'a Record>> {
    let total = groups.len();
    let eligible: Vec<Vec<&Record>> = groups
        .into_iter()
        .filter(|group| {
            group
                .iter()
                .any(|record| record.kind() == RecordKind::TransactionPart1)
        })
        .collect();

    if eligible.len() < total {
        debug!(
            "Dropped {} group(s) without a part-1 movement record",
            total - eligible.len()
        );
    }
    eligible
}

/// Collapses the fixed-width padding left between concatenated
/// communication fields into single spaces.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
