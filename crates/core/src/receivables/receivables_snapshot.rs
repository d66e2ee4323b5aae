use std::collections::HashSet;

use super::receivables_model::{Receivable, ReceivablePatch};
use crate::errors::ValidationError;
use crate::{Error, Result};

/// In-memory collection of receivables as the client last saw them.
///
/// Ids are unique within a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceivableSnapshot {
    records: Vec<Receivable>,
}

impl ReceivableSnapshot {
    pub fn new(records: Vec<Receivable>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Duplicate receivable id '{}' in snapshot",
                    record.id
                ))));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Receivable] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Receivable> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Receivable> {
        self.records.iter().find(|record| record.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Merges `patch` into the record with `id` and returns the new version.
    ///
    /// An unknown id leaves the snapshot as it was.
    pub fn apply_patch(&mut self, id: &str, patch: &ReceivablePatch) -> Result<Receivable> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        record.apply(patch);
        Ok(record.clone())
    }

    /// Replaces the stored record that has the same id, returning the old one.
    pub fn replace(&mut self, record: Receivable) -> Result<Receivable> {
        let index = self.position(&record.id)?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Puts back a pre-patch record after the store rejected an update.
    pub fn restore(&mut self, original: Receivable) -> Result<()> {
        self.replace(original).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ReceivableSnapshot {
        ReceivableSnapshot::new(vec![
            Receivable::new("r-1", "Adams Ltd", "6/1/25".into()),
            Receivable::new("r-2", "Baker Inc", "5/1/25".into()),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = ReceivableSnapshot::new(vec![
            Receivable::new("r-1", "Adams Ltd", "6/1/25".into()),
            Receivable::new("r-1", "Adams Ltd", "6/2/25".into()),
        ]);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_apply_patch_touches_only_patched_fields() {
        let mut snapshot = snapshot();
        let patch = ReceivablePatch {
            follow_up: Some(true),
            ..Default::default()
        };
        let updated = snapshot.apply_patch("r-2", &patch).unwrap();
        assert!(updated.follow_up);
        assert!(!updated.escalation);
        assert_eq!(updated.customer_name, "Baker Inc");
        assert_eq!(snapshot.find("r-2"), Some(&updated));
        assert!(!snapshot.find("r-1").unwrap().follow_up);
    }

    #[test]
    fn test_apply_patch_unknown_id_leaves_snapshot_unchanged() {
        let mut snapshot = snapshot();
        let before = snapshot.clone();
        let patch = ReceivablePatch {
            escalation: Some(true),
            ..Default::default()
        };
        let err = snapshot.apply_patch("missing", &patch).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_action_taken_can_be_set_and_cleared() {
        let mut snapshot = snapshot();
        let set = ReceivablePatch {
            action_taken: Some(Some("Called".to_string())),
            ..Default::default()
        };
        snapshot.apply_patch("r-1", &set).unwrap();
        assert_eq!(
            snapshot.find("r-1").unwrap().action_taken.as_deref(),
            Some("Called")
        );

        let untouched = snapshot.apply_patch("r-1", &ReceivablePatch::default()).unwrap();
        assert_eq!(untouched.action_taken.as_deref(), Some("Called"));

        let clear = ReceivablePatch {
            action_taken: Some(None),
            ..Default::default()
        };
        let cleared = snapshot.apply_patch("r-1", &clear).unwrap();
        assert_eq!(cleared.action_taken, None);
    }

    #[test]
    fn test_restore_puts_back_original() {
        let mut snapshot = snapshot();
        let original = snapshot.find("r-1").cloned().unwrap();
        let patch = ReceivablePatch {
            slack_updated: Some(true),
            ..Default::default()
        };
        snapshot.apply_patch("r-1", &patch).unwrap();
        snapshot.restore(original.clone()).unwrap();
        assert_eq!(snapshot.find("r-1"), Some(&original));
        assert_eq!(snapshot.len(), 2);
    }
}
