//! Record and raw-line builders shared by the unit tests.

use crate::decimal::Decimal3;
use crate::record::{
    InformationPart1, InformationPart2, InformationPart3, Record, TransactionCode,
    TransactionPart1, TransactionPart2, TransactionPart3,
};
use chrono::NaiveDate;

pub fn transaction_code(transaction_type: &str, operation: &str) -> TransactionCode {
    TransactionCode {
        transaction_type: transaction_type.chars().next().unwrap_or('0'),
        family: "01".to_string(),
        operation: operation.to_string(),
        category: "000".to_string(),
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 15).unwrap()
}

pub fn transaction_part_1(
    sequence_number: u32,
    sequence_number_detail: u32,
    transaction_type: &str,
    operation: &str,
) -> Record {
    Record::TransactionPart1(TransactionPart1 {
        sequence_number,
        sequence_number_detail,
        bank_reference: format!("REF{sequence_number:04}{sequence_number_detail:04}"),
        amount: Decimal3::ZERO,
        value_date: test_date(),
        transaction_code: transaction_code(transaction_type, operation),
        structured: false,
        communication: String::new(),
        entry_date: test_date(),
        statement_number: "001".to_string(),
        globalisation_code: '0',
    })
}

pub fn transaction_part_2(sequence_number: u32, sequence_number_detail: u32) -> Record {
    Record::TransactionPart2(TransactionPart2 {
        sequence_number,
        sequence_number_detail,
        communication: String::new(),
        customer_reference: String::new(),
        counterparty_bic: String::new(),
    })
}

pub fn transaction_part_3(sequence_number: u32, sequence_number_detail: u32) -> Record {
    Record::TransactionPart3(TransactionPart3 {
        sequence_number,
        sequence_number_detail,
        counterparty_account: String::new(),
        counterparty_name: String::new(),
        communication: String::new(),
    })
}

pub fn info_part_1(sequence_number: u32, sequence_number_detail: u32) -> Record {
    Record::InformationPart1(InformationPart1 {
        sequence_number,
        sequence_number_detail,
        bank_reference: String::new(),
        transaction_code: transaction_code("0", "01"),
        structured: false,
        communication: String::new(),
    })
}

pub fn info_part_2(sequence_number: u32, sequence_number_detail: u32) -> Record {
    Record::InformationPart2(InformationPart2 {
        sequence_number,
        sequence_number_detail,
        communication: String::new(),
    })
}

pub fn info_part_3(sequence_number: u32, sequence_number_detail: u32) -> Record {
    Record::InformationPart3(InformationPart3 {
        sequence_number,
        sequence_number_detail,
        communication: String::new(),
    })
}

/// Fixed-width raw line construction for lexer tests.
pub mod line_builder {
    /// A blank 128-column line with the record-type digit in column 1.
    pub fn coda_line(kind: char) -> String {
        let mut line = " ".repeat(128);
        put(&mut line, 0, &kind.to_string());
        line
    }

    /// Overwrites the columns starting at `start` with `text`.
    pub fn put(line: &mut String, start: usize, text: &str) {
        let mut chars: Vec<char> = line.chars().collect();
        for (offset, character) in text.chars().enumerate() {
            chars[start + offset] = character;
        }
        *line = chars.into_iter().collect();
    }
}
