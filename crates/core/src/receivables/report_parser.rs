//! Parsing of the accounting system's aged receivable detail report payload.
//!
//! The payload is a column/row grid. Columns are matched by title; when a
//! title is missing the historical positions (customer, due date, open
//! balance = 0, 1, 2) are used instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::receivables_model::NewReceivable;
use crate::constants::REPORT_PREAMBLE_ROWS;
use crate::dates::RawDate;
use crate::errors::ImportError;
use crate::metrics::BalanceValue;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgedReceivableReport {
    #[serde(default)]
    pub header: Option<ReportHeader>,
    #[serde(default)]
    pub columns: Option<ReportColumns>,
    #[serde(default)]
    pub rows: Option<ReportRows>,
}

impl AgedReceivableReport {
    /// Decodes a report payload; undecodable JSON is a malformed report.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ImportError::MalformedReport(e.to_string()).into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportHeader {
    #[serde(default)]
    pub report_name: Option<String>,
    #[serde(default)]
    pub start_period: Option<String>,
    #[serde(default)]
    pub end_period: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportColumns {
    #[serde(default)]
    pub column: Vec<ReportColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportColumn {
    #[serde(default)]
    pub col_title: String,
    #[serde(default)]
    pub col_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRows {
    #[serde(default)]
    pub row: Vec<ReportRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    /// `Data`, `Section`, ... Rows without a type are treated as data.
    #[serde(rename = "type", default)]
    pub row_type: Option<String>,
    #[serde(default)]
    pub col_data: Vec<ColData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColData {
    #[serde(default)]
    pub value: Value,
}

impl ColData {
    fn text(&self) -> Option<String> {
        let text = match &self.value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Records read from a report or export plus the number of rows left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecords {
    pub records: Vec<NewReceivable>,
    pub skipped: usize,
}

/// Customer display name: text before the first `:` (sub-customer
/// separator), trimmed.
pub fn normalize_customer_name(raw: &str) -> String {
    raw.split(':').next().unwrap_or_default().trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    customer: usize,
    due_date: usize,
    open_balance: usize,
    transaction_date: Option<usize>,
    transaction_type: Option<usize>,
    document_number: Option<usize>,
    amount: Option<usize>,
}

impl ColumnLayout {
    fn from_columns(columns: Option<&ReportColumns>) -> Self {
        let titles: Vec<String> = columns
            .map(|c| c.column.iter().map(|col| title_key(&col.col_title)).collect())
            .unwrap_or_default();
        let find = |candidates: &[&str]| {
            titles
                .iter()
                .position(|title| candidates.contains(&title.as_str()))
        };

        ColumnLayout {
            customer: find(&["customer", "customerfullname", "name"]).unwrap_or(0),
            due_date: find(&["duedate"]).unwrap_or(1),
            open_balance: find(&["openbalance", "openbal", "balance"]).unwrap_or(2),
            transaction_date: find(&["date", "txndate", "transactiondate"]),
            transaction_type: find(&["transactiontype", "txntype"]),
            document_number: find(&["num", "docnum", "no"]),
            amount: find(&["amount", "amt"]),
        }
    }
}

fn title_key(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Reads receivables out of a report payload.
///
/// The first [`REPORT_PREAMBLE_ROWS`] rows are headers and are dropped.
/// Non-data rows and rows without a customer are counted as skipped.
pub fn parse_report(report: &AgedReceivableReport) -> ParsedRecords {
    let layout = ColumnLayout::from_columns(report.columns.as_ref());
    let rows = report.rows.as_ref().map(|r| r.row.as_slice()).unwrap_or(&[]);

    let mut parsed = ParsedRecords::default();
    for row in rows.iter().skip(REPORT_PREAMBLE_ROWS) {
        let is_data = row
            .row_type
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case("data"));
        let cell = |index: usize| row.col_data.get(index).and_then(ColData::text);
        let optional_cell = |index: Option<usize>| index.and_then(cell);

        let customer_name = cell(layout.customer)
            .map(|raw| normalize_customer_name(&raw))
            .unwrap_or_default();
        if !is_data || customer_name.is_empty() {
            parsed.skipped += 1;
            continue;
        }

        let document_number = optional_cell(layout.document_number);
        parsed.records.push(NewReceivable {
            id: document_number.clone(),
            transaction_date: optional_cell(layout.transaction_date).map(RawDate::Text),
            transaction_type: optional_cell(layout.transaction_type),
            document_number,
            customer_name,
            due_date: cell(layout.due_date).map(RawDate::Text),
            amount: optional_cell(layout.amount).map(BalanceValue::Text),
            open_balance: cell(layout.open_balance).map(BalanceValue::Text),
        });
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn row(values: &[&str]) -> Value {
        json!({
            "type": "Data",
            "ColData": values.iter().map(|v| json!({ "value": v })).collect::<Vec<_>>(),
        })
    }

    fn preamble() -> Vec<Value> {
        vec![
            json!({ "type": "Section", "ColData": [] }),
            json!({ "type": "Section", "ColData": [] }),
            json!({ "type": "Section", "ColData": [] }),
        ]
    }

    #[test]
    fn test_normalize_customer_name() {
        assert_eq!(normalize_customer_name("Adams Ltd:Project X"), "Adams Ltd");
        assert_eq!(normalize_customer_name("  Baker Inc  "), "Baker Inc");
        assert_eq!(normalize_customer_name(":orphan"), "");
        assert_eq!(normalize_customer_name(""), "");
    }

    #[test]
    fn test_parse_report_by_column_title() {
        let mut rows = preamble();
        rows.push(row(&["05/01/2025", "Invoice", "1001", "Adams Ltd:Job 7", "05/31/2025", "1,200.00", "1,000.50"]));
        rows.push(row(&["05/02/2025", "Invoice", "1002", "", "06/01/2025", "10.00", "10.00"]));
        let payload = json!({
            "Header": { "ReportName": "AgedReceivableDetail", "Currency": "USD" },
            "Columns": { "Column": [
                { "ColTitle": "Date", "ColType": "tx_date" },
                { "ColTitle": "Transaction Type", "ColType": "txn_type" },
                { "ColTitle": "Num", "ColType": "doc_num" },
                { "ColTitle": "Customer", "ColType": "cust_name" },
                { "ColTitle": "Due Date", "ColType": "due_date" },
                { "ColTitle": "Amount", "ColType": "subt_amount" },
                { "ColTitle": "Open Balance", "ColType": "subt_open_bal" }
            ]},
            "Rows": { "Row": rows },
        });
        let report: AgedReceivableReport = serde_json::from_value(payload).unwrap();
        let parsed = parse_report(&report);

        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.records.len(), 1);
        let record = &parsed.records[0];
        assert_eq!(record.id.as_deref(), Some("1001"));
        assert_eq!(record.customer_name, "Adams Ltd");
        assert_eq!(record.due_date, Some(RawDate::Text("05/31/2025".to_string())));
        assert_eq!(record.open_balance, Some(BalanceValue::Text("1,000.50".to_string())));
        assert_eq!(record.amount, Some(BalanceValue::Text("1,200.00".to_string())));
        assert_eq!(record.transaction_type.as_deref(), Some("Invoice"));
    }

    #[test]
    fn test_parse_report_positional_fallback() {
        let mut rows = preamble();
        rows.push(row(&["Baker Inc", "6/15/25", "250"]));
        rows.push(json!({ "type": "Section", "ColData": [{ "value": "Total" }] }));
        let report: AgedReceivableReport =
            serde_json::from_value(json!({ "Rows": { "Row": rows } })).unwrap();
        let parsed = parse_report(&report);

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.records[0].customer_name, "Baker Inc");
        assert_eq!(parsed.records[0].id, None);
        assert_eq!(
            parsed.records[0].open_balance,
            Some(BalanceValue::Text("250".to_string()))
        );
    }

    #[test]
    fn test_parse_report_numeric_cells_and_empty_payload() {
        let mut rows = preamble();
        rows.push(json!({ "ColData": [
            { "value": "Carter Co" }, { "value": "2025-06-01" }, { "value": 99.5 }
        ]}));
        let report: AgedReceivableReport =
            serde_json::from_value(json!({ "Rows": { "Row": rows } })).unwrap();
        let parsed = parse_report(&report);
        assert_eq!(
            parsed.records[0].open_balance,
            Some(BalanceValue::Text("99.5".to_string()))
        );

        let empty = parse_report(&AgedReceivableReport::default());
        assert!(empty.records.is_empty());
        assert_eq!(empty.skipped, 0);
    }

    #[test]
    fn test_from_json_rejects_malformed_payload() {
        for payload in ["", "{\"Rows\": ", "\"report\"", "{\"Rows\": {\"Row\": 7}}"] {
            let result = AgedReceivableReport::from_json(payload.as_bytes());
            assert!(
                matches!(result, Err(Error::Import(ImportError::MalformedReport(_)))),
                "{payload:?}"
            );
        }

        let report = AgedReceivableReport::from_json(br#"{"Rows": {"Row": []}}"#).unwrap();
        assert!(parse_report(&report).records.is_empty());
    }
}
