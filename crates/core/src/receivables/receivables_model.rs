//! Receivable domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::{normalize_date, NormalizedDate, RawDate};
use crate::metrics::{normalize_optional_balance, BalanceValue};
use crate::Error;

/// Domain model representing one invoice or transaction line.
///
/// Dates and amounts are kept as they arrived; use the `normalized_*`
/// accessors for arithmetic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receivable {
    pub id: String,
    #[serde(default)]
    pub transaction_date: Option<RawDate>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    /// Document number from the accounting system (`Num`)
    #[serde(default)]
    pub document_number: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub due_date: Option<RawDate>,
    #[serde(default)]
    pub amount: Option<BalanceValue>,
    #[serde(default)]
    pub open_balance: Option<BalanceValue>,
    #[serde(default)]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub slack_updated: bool,
    #[serde(default)]
    pub follow_up: bool,
    #[serde(default)]
    pub escalation: bool,
}

impl Receivable {
    pub fn new(id: impl Into<String>, customer_name: impl Into<String>, due_date: RawDate) -> Self {
        Self {
            id: id.into(),
            customer_name: customer_name.into(),
            due_date: Some(due_date),
            ..Default::default()
        }
    }

    /// Due date as a calendar date; a missing due date is `Invalid`.
    pub fn normalized_due_date(&self) -> NormalizedDate {
        self.due_date
            .as_ref()
            .map_or(NormalizedDate::Invalid, normalize_date)
    }

    pub fn normalized_open_balance(&self) -> Decimal {
        normalize_optional_balance(self.open_balance.as_ref())
    }

    /// Merges the fields present in `patch`. Other fields are untouched.
    pub fn apply(&mut self, patch: &ReceivablePatch) {
        if let Some(action_taken) = &patch.action_taken {
            self.action_taken = action_taken.clone();
        }
        if let Some(slack_updated) = patch.slack_updated {
            self.slack_updated = slack_updated;
        }
        if let Some(follow_up) = patch.follow_up {
            self.follow_up = follow_up;
        }
        if let Some(escalation) = patch.escalation {
            self.escalation = escalation;
        }
    }
}

/// Input model for loading a receivable from an accounting source.
///
/// Workflow fields are absent on purpose: re-importing a record keeps
/// whatever the users already recorded on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReceivable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub transaction_date: Option<RawDate>,
    pub transaction_type: Option<String>,
    pub document_number: Option<String>,
    pub customer_name: String,
    pub due_date: Option<RawDate>,
    pub amount: Option<BalanceValue>,
    pub open_balance: Option<BalanceValue>,
}

/// Partial update of a receivable's workflow fields.
///
/// Absent fields are left alone; `actionTaken: null` clears the field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivablePatch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub action_taken: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_updated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<bool>,
}

impl ReceivablePatch {
    pub fn is_empty(&self) -> bool {
        self.action_taken.is_none()
            && self.slack_updated.is_none()
            && self.follow_up.is_none()
            && self.escalation.is_none()
    }
}

/// Result of an optimistic patch.
///
/// The core never rolls back on its own: on rejection the caller gets the
/// pre-patch record and decides whether to restore it.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The repository acknowledged the update; this is its version of the record.
    Confirmed(Receivable),
    /// The repository refused or could not be reached.
    Rejected {
        original: Receivable,
        optimistic: Receivable,
        error: Error,
    },
}

impl PatchOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, PatchOutcome::Confirmed(_))
    }
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
