//! Receivables module - records, patch workflow, repository contract and imports.

mod accounting_client;
mod csv_import;
mod receivables_constants;
mod receivables_model;
mod receivables_service;
mod receivables_snapshot;
mod receivables_traits;
mod report_parser;


pub use accounting_client::{AccountingReportClient, AgedReceivableQuery};
pub use csv_import::parse_csv_export;
pub use receivables_constants::*;
pub use receivables_model::{
    ImportSummary, NewReceivable, PatchOutcome, Receivable, ReceivablePatch,
};
pub use receivables_service::ReceivableService;
pub use receivables_snapshot::ReceivableSnapshot;
pub use receivables_traits::{ReceivableRepositoryTrait, ReceivableServiceTrait};
pub use report_parser::{
    normalize_customer_name, parse_report, AgedReceivableReport, ColData, ParsedRecords,
    ReportColumn, ReportColumns, ReportHeader, ReportRow, ReportRows,
};
