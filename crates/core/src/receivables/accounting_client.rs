//! HTTP client for the accounting system's aged receivable detail report.

use std::time::Duration;

use chrono::NaiveDate;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::report_parser::AgedReceivableReport;
use crate::errors::ValidationError;
use crate::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REPORT_NAME: &str = "AgedReceivableDetail";
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters of an aged receivable detail request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgedReceivableQuery {
    pub realm_id: String,
    pub report_date: NaiveDate,
    pub start_due_date: NaiveDate,
    pub end_due_date: NaiveDate,
    /// Comma separated column list, e.g. `due_date,cust_name`.
    #[serde(default)]
    pub columns: Option<String>,
}

pub struct AccountingReportClient {
    client: Client,
    base_url: String,
}

impl AccountingReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full report URL for `query`.
    pub fn report_url(&self, query: &AgedReceivableQuery) -> Result<Url> {
        if query.realm_id.trim().is_empty() {
            return Err(ValidationError::MissingField("realmId".to_string()).into());
        }

        let endpoint = format!(
            "{}/v3/company/{}/reports/{}",
            self.base_url,
            urlencoding::encode(query.realm_id.trim()),
            REPORT_NAME
        );
        let mut params = vec![
            ("report_date", query.report_date.format(QUERY_DATE_FORMAT).to_string()),
            ("start_due_date", query.start_due_date.format(QUERY_DATE_FORMAT).to_string()),
            ("end_due_date", query.end_due_date.format(QUERY_DATE_FORMAT).to_string()),
        ];
        if let Some(columns) = query.columns.as_deref().filter(|c| !c.is_empty()) {
            params.push(("columns", columns.to_string()));
        }

        Url::parse_with_params(&endpoint, &params).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Failed to build report URL: {}",
                e
            )))
        })
    }

    /// Fetches the report. Network and HTTP status failures are transport errors.
    pub async fn fetch_aged_receivable_detail(
        &self,
        query: &AgedReceivableQuery,
    ) -> Result<AgedReceivableReport> {
        let url = self.report_url(query)?;
        debug!("Accounting report request: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "Accounting API answered HTTP {}",
                status
            )));
        }

        let body = response.bytes().await?;
        AgedReceivableReport::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> AgedReceivableQuery {
        AgedReceivableQuery {
            realm_id: "1386066315".to_string(),
            report_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            start_due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_due_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            columns: None,
        }
    }

    #[test]
    fn test_report_url() {
        let client = AccountingReportClient::new("https://accounting.example.com/api/");
        let url = client.report_url(&query()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://accounting.example.com/api/v3/company/1386066315/reports/AgedReceivableDetail\
             ?report_date=2025-06-30&start_due_date=2025-01-01&end_due_date=2025-06-30"
        );
    }

    #[test]
    fn test_report_url_with_columns() {
        let client = AccountingReportClient::new("http://localhost:9000");
        let mut q = query();
        q.columns = Some("due_date,cust_name".to_string());
        let url = client.report_url(&q).unwrap();
        assert!(url.as_str().ends_with("&columns=due_date%2Ccust_name"));
    }

    #[test]
    fn test_report_url_requires_realm() {
        let client = AccountingReportClient::new("http://localhost:9000");
        let mut q = query();
        q.realm_id = "  ".to_string();
        assert!(matches!(
            client.report_url(&q),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }
}
