//! Fixed-width decode of raw CODA lines into typed [`Record`]s.
//!
//! Every CODA line is 128 characters. The leading digit selects the
//! record kind ('0' identification, '1' initial state, '2' movement,
//! '3' information, '4' message, '8' new state, '9' trailer); movement
//! and information lines carry a part digit in the second column. Fields
//! live at fixed column offsets, decoded here with no lookahead.
//!
//! Dates are DDMMYY with a fixed 2000 pivot. Amounts are a sign column
//! ('0' credit, '1' debit) followed by 15 digits with 3 implied decimal
//! places.

use crate::decimal::Decimal3;
use crate::error::{ParseError, Result};
use crate::record::{
    Identification, InformationPart1, InformationPart2, InformationPart3, InitialState, Message,
    NewState, Record, TransactionCode, TransactionPart1, TransactionPart2, TransactionPart3,
};
use chrono::NaiveDate;
use log::{debug, warn};
use std::io::BufRead;

/// Nominal CODA line width; anything shorter (other than blank lines and
/// trailers) is rejected.
const LINE_WIDTH: usize = 128;

/// One raw line, indexed by character so multi-byte holder names don't
/// break column arithmetic.
struct Columns {
    chars: Vec<char>,
    row: usize,
}

impl Columns {
    fn new(line: &str, row: usize) -> Self {
        Columns {
            chars: line.chars().collect(),
            row,
        }
    }

    fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or(' ')
    }

    /// Raw column range `[start..end)` as a string, untrimmed.
    fn raw(&self, start: usize, end: usize) -> String {
        self.chars[start.min(self.chars.len())..end.min(self.chars.len())]
            .iter()
            .collect()
    }

    /// Column range with surrounding blanks removed.
    fn text(&self, start: usize, end: usize) -> String {
        self.raw(start, end).trim().to_string()
    }

    fn number(&self, start: usize, end: usize) -> Result<u32> {
        let value = self.raw(start, end);
        value.trim().parse().map_err(|_| ParseError::InvalidNumber {
            row: self.row,
            value,
        })
    }

    fn date(&self, start: usize) -> Result<NaiveDate> {
        let value = self.raw(start, start + 6);
        let parse =
            |range: std::ops::Range<usize>| value.get(range).and_then(|s| s.parse::<u32>().ok());
        parse(0..2)
            .zip(parse(2..4))
            .zip(parse(4..6))
            .and_then(|((day, month), year)| {
                NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
            })
            .ok_or_else(|| ParseError::InvalidDate {
                row: self.row,
                value,
            })
    }

    /// Sign column at `sign` plus 15 amount digits starting right after it.
    fn amount(&self, sign: usize) -> Result<Decimal3> {
        let digits = self.raw(sign + 1, sign + 16);
        Decimal3::from_coda(self.char_at(sign), &digits).ok_or_else(|| ParseError::InvalidAmount {
            row: self.row,
            value: format!("{}{digits}", self.char_at(sign)),
        })
    }

    /// 8-character transaction code starting at `start`:
    /// type (1) + family (2) + operation (2) + category (3).
    fn transaction_code(&self, start: usize) -> TransactionCode {
        TransactionCode {
            transaction_type: self.char_at(start),
            family: self.raw(start + 1, start + 3),
            operation: self.raw(start + 3, start + 5),
            category: self.raw(start + 5, start + 8),
        }
    }
}

/// Decodes one raw line into a record.
///
/// Returns `Ok(None)` for trailer lines ('9'), which close a statement
/// and carry only control totals this parser does not check.
pub fn parse_line(line: &str, row: usize) -> Result<Option<Record>> {
    if line.starts_with('9') {
        return Ok(None);
    }

    let columns = Columns::new(line, row);
    if columns.chars.len() < LINE_WIDTH {
        return Err(ParseError::LineTooShort {
            row,
            length: columns.chars.len(),
        });
    }

    let record = match (columns.char_at(0), columns.char_at(1)) {
        ('0', _) => Record::Identification(Identification {
            creation_date: columns.date(5)?,
            bank_id: columns.text(11, 14),
            is_duplicate: columns.char_at(16) == 'D',
            file_reference: columns.text(24, 34),
            account_holder_name: columns.text(34, 60),
            bic: columns.text(60, 71),
        }),
        ('1', _) => Record::InitialState(InitialState {
            account_structure: columns.char_at(1),
            paper_sequence_number: columns.number(2, 5)?,
            account_and_currency: columns.raw(5, 42),
            balance: columns.amount(42)?,
            date: columns.date(58)?,
            account_holder_name: columns.text(64, 90),
            sequence_number: columns.number(125, 128)?,
        }),
        ('2', '1') => Record::TransactionPart1(TransactionPart1 {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            bank_reference: columns.text(10, 31),
            amount: columns.amount(31)?,
            value_date: columns.date(47)?,
            transaction_code: columns.transaction_code(53),
            structured: columns.char_at(61) == '1',
            communication: columns.raw(62, 115),
            entry_date: columns.date(115)?,
            statement_number: columns.text(121, 124),
            globalisation_code: columns.char_at(124),
        }),
        ('2', '2') => Record::TransactionPart2(TransactionPart2 {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            communication: columns.raw(10, 63),
            customer_reference: columns.text(63, 98),
            counterparty_bic: columns.text(98, 109),
        }),
        ('2', '3') => Record::TransactionPart3(TransactionPart3 {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            counterparty_account: columns.text(10, 47),
            counterparty_name: columns.text(47, 82),
            communication: columns.raw(82, 125),
        }),
        ('3', '1') => Record::InformationPart1(InformationPart1 {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            bank_reference: columns.text(10, 31),
            transaction_code: columns.transaction_code(31),
            structured: columns.char_at(39) == '1',
            communication: columns.raw(40, 113),
        }),
        ('3', '2') => Record::InformationPart2(InformationPart2 {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            communication: columns.raw(10, 115),
        }),
        ('3', '3') => Record::InformationPart3(InformationPart3 {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            communication: columns.raw(10, 100),
        }),
        ('4', _) => Record::Message(Message {
            sequence_number: columns.number(2, 6)?,
            sequence_number_detail: columns.number(6, 10)?,
            text: columns.raw(32, 112),
        }),
        ('8', _) => Record::NewState(NewState {
            sequence_number: columns.number(1, 4)?,
            balance: columns.amount(41)?,
            date: columns.date(57)?,
        }),
        (tag, part) => {
            return Err(ParseError::UnknownRecordKind {
                row,
                tag: format!("{tag}{part}").trim().to_string(),
            })
        }
    };

    Ok(Some(record))
}

/// Reads all records of one statement from a reader.
///
/// Blank lines and trailer lines are skipped; any other undecodable line
/// aborts with an error carrying its 1-based row.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for (row_idx, line) in reader.lines().enumerate() {
        let row = row_idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            debug!("Row {}: skipping blank line", row);
            continue;
        }
        match parse_line(&line, row)? {
            Some(record) => records.push(record),
            None => warn!("Row {}: skipping trailer line", row),
        }
    }

    debug!("Decoded {} records", records.len());
    Ok(records)
}
