//! Import of the accounting system's aged receivable CSV export.
//!
//! The export starts with a three line title block, then a header row and
//! data rows laid out as:
//! `(blank), Date, Transaction type, Num, Customer full name, Due date, Amount, Open balance`.

use csv::ReaderBuilder;

use super::report_parser::{normalize_customer_name, ParsedRecords};
use super::receivables_model::NewReceivable;
use crate::constants::REPORT_PREAMBLE_ROWS;
use crate::dates::RawDate;
use crate::errors::ImportError;
use crate::metrics::BalanceValue;
use crate::Result;

const COL_DATE: usize = 1;
const COL_TRANSACTION_TYPE: usize = 2;
const COL_NUM: usize = 3;
const COL_CUSTOMER: usize = 4;
const COL_DUE_DATE: usize = 5;
const COL_AMOUNT: usize = 6;
const COL_OPEN_BALANCE: usize = 7;

const HEADER_CUSTOMER_TITLE: &str = "customer full name";

/// Parses a CSV export into receivables.
///
/// Lines of the title block are recognized by their line number, so blank
/// lines inside it do not shift the data. The header row and rows without
/// a customer are skipped.
pub fn parse_csv_export(data: &[u8]) -> Result<ParsedRecords> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut parsed = ParsedRecords::default();
    for result in reader.records() {
        let record = result.map_err(ImportError::from)?;
        let line = record.position().map_or(u64::MAX, |p| p.line());
        if line <= REPORT_PREAMBLE_ROWS as u64 {
            continue;
        }

        let field = |index: usize| {
            record
                .get(index)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let customer_name = field(COL_CUSTOMER)
            .map(|raw| normalize_customer_name(&raw))
            .unwrap_or_default();
        if customer_name.is_empty() || customer_name.eq_ignore_ascii_case(HEADER_CUSTOMER_TITLE) {
            parsed.skipped += 1;
            continue;
        }

        let document_number = field(COL_NUM);
        parsed.records.push(NewReceivable {
            id: document_number.clone(),
            transaction_date: field(COL_DATE).map(RawDate::Text),
            transaction_type: field(COL_TRANSACTION_TYPE),
            document_number,
            customer_name,
            due_date: field(COL_DUE_DATE).map(RawDate::Text),
            amount: field(COL_AMOUNT).map(BalanceValue::Text),
            open_balance: field(COL_OPEN_BALANCE).map(BalanceValue::Text),
        });
    }
    Ok(parsed)
}
