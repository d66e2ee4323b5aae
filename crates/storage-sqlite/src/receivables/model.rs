//! Database models for receivables.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use receivables_core::dates::RawDate;
use receivables_core::metrics::BalanceValue;
use receivables_core::receivables::{NewReceivable, Receivable, ReceivablePatch};

/// Database model for receivables
///
/// Dates and balances are stored as the text they arrived as and are only
/// normalized when aged.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::receivables)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReceivableDB {
    pub id: String,
    pub transaction_date: Option<String>,
    pub transaction_type: Option<String>,
    pub document_number: Option<String>,
    pub customer_name: String,
    pub due_date: Option<String>,
    pub amount: Option<String>,
    pub open_balance: Option<String>,
    pub action_taken: Option<String>,
    pub slack_updated: bool,
    pub follow_up: bool,
    pub escalation: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Imported source fields. On conflict these overwrite the stored row while
/// the workflow columns are left alone.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::receivables)]
pub struct ImportedReceivableDB {
    pub id: String,
    pub transaction_date: Option<String>,
    pub transaction_type: Option<String>,
    pub document_number: Option<String>,
    pub customer_name: String,
    pub due_date: Option<String>,
    pub amount: Option<String>,
    pub open_balance: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Workflow field update. `None` leaves a column untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::receivables)]
pub struct ReceivableWorkflowChangeset {
    pub action_taken: Option<Option<String>>,
    pub slack_updated: Option<bool>,
    pub follow_up: Option<bool>,
    pub escalation: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl ReceivableWorkflowChangeset {
    pub fn from_patch(patch: ReceivablePatch, updated_at: NaiveDateTime) -> Self {
        Self {
            action_taken: patch.action_taken,
            slack_updated: patch.slack_updated,
            follow_up: patch.follow_up,
            escalation: patch.escalation,
            updated_at,
        }
    }
}

impl ImportedReceivableDB {
    pub fn from_new(record: NewReceivable, id: String, updated_at: NaiveDateTime) -> Self {
        Self {
            id,
            transaction_date: record.transaction_date.as_ref().map(RawDate::as_text),
            transaction_type: record.transaction_type,
            document_number: record.document_number,
            customer_name: record.customer_name,
            due_date: record.due_date.as_ref().map(RawDate::as_text),
            amount: record.amount.as_ref().map(BalanceValue::as_text),
            open_balance: record.open_balance.as_ref().map(BalanceValue::as_text),
            updated_at,
        }
    }
}

// Conversion to domain models
impl From<ReceivableDB> for Receivable {
    fn from(db: ReceivableDB) -> Self {
        Self {
            id: db.id,
            transaction_date: db.transaction_date.map(RawDate::Text),
            transaction_type: db.transaction_type,
            document_number: db.document_number,
            customer_name: db.customer_name,
            due_date: db.due_date.map(RawDate::Text),
            amount: db.amount.map(BalanceValue::Text),
            open_balance: db.open_balance.map(BalanceValue::Text),
            action_taken: db.action_taken,
            slack_updated: db.slack_updated,
            follow_up: db.follow_up,
            escalation: db.escalation,
        }
    }
}
