//! In-memory record store with the indices the merge step relies on.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::classifier::ApplicationStatus;
use crate::error::StoreError;

use super::record::{company_key, IdentityKey, JobApplicationRecord, RowId};

/// Append-only set of known applications.
///
/// Keeps three indices in step with the records: seen message ids, rows per
/// normalized company, and fallback identity keys. Identity keys of
/// superseded statuses stay registered so a stale message cannot re-create
/// a record.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<JobApplicationRecord>,
    message_ids: HashSet<String>,
    by_company: HashMap<String, Vec<RowId>>,
    identities: HashSet<IdentityKey>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted records, in row order, rebuilding every
    /// index. This is the required initialization before a batch.
    pub fn from_records(records: Vec<JobApplicationRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        debug!(
            "Record store initialized with {} records across {} companies",
            store.records.len(),
            store.by_company.len()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: RowId) -> Option<&JobApplicationRecord> {
        self.records.get(row.0)
    }

    pub fn records(&self) -> impl Iterator<Item = (RowId, &JobApplicationRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (RowId(i), record))
    }

    pub fn contains_message_id(&self, message_id: &str) -> bool {
        self.message_ids.contains(message_id)
    }

    pub fn contains_identity(&self, key: &IdentityKey) -> bool {
        self.identities.contains(key)
    }

    /// Rows of records whose company matches, in store order.
    pub fn rows_for_company(&self, company: &str) -> &[RowId] {
        self.by_company
            .get(&company_key(company))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Appends a record and registers it in every index.
    pub fn insert(&mut self, record: JobApplicationRecord) -> Result<RowId, StoreError> {
        if let Some(id) = &record.message_id {
            if self.message_ids.contains(id) {
                return Err(StoreError::DuplicateMessageId(id.clone()));
            }
            self.message_ids.insert(id.clone());
        }

        let row = RowId(self.records.len());
        self.by_company
            .entry(record.company_key())
            .or_default()
            .push(row);
        self.identities.insert(record.identity_key());
        self.records.push(record);
        Ok(row)
    }

    /// Records an identity key without a row, so a later message with the
    /// same (title, company, status) is recognized as already handled.
    pub fn register_identity(&mut self, key: IdentityKey) {
        self.identities.insert(key);
    }

    /// Moves a record to a new status. A given message id replaces the
    /// stored one; `None` keeps it.
    pub fn update_status(
        &mut self,
        row: RowId,
        status: ApplicationStatus,
        message_id: Option<String>,
    ) -> Result<(), StoreError> {
        if let Some(id) = &message_id {
            if self.message_ids.contains(id) {
                return Err(StoreError::DuplicateMessageId(id.clone()));
            }
        }

        let record = self
            .records
            .get_mut(row.0)
            .ok_or(StoreError::NoSuchRow(row.0))?;
        record.status = status;
        if let Some(id) = message_id {
            self.message_ids.insert(id.clone());
            record.message_id = Some(id);
        }
        self.identities.insert(record.identity_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(company: &str, status: ApplicationStatus, id: Option<&str>) -> JobApplicationRecord {
        JobApplicationRecord {
            date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            title: "Analyst".to_string(),
            company: company.to_string(),
            status,
            sender: "hr@example.com".to_string(),
            message_id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_from_records_builds_indices() {
        let store = RecordStore::from_records(vec![
            record("Acme Corp", ApplicationStatus::Applied, Some("1")),
            record("Globex", ApplicationStatus::Interview, None),
            record("acme corp ", ApplicationStatus::Offer, Some("3")),
        ])
        .unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.contains_message_id("1"));
        assert!(!store.contains_message_id("2"));
        assert_eq!(store.rows_for_company("ACME CORP"), &[RowId(0), RowId(2)]);
        assert_eq!(store.rows_for_company("Initech"), &[] as &[RowId]);
        assert!(store.contains_identity(&IdentityKey::new(
            "analyst",
            "globex",
            ApplicationStatus::Interview
        )));
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let result = RecordStore::from_records(vec![
            record("Acme", ApplicationStatus::Applied, Some("7")),
            record("Globex", ApplicationStatus::Applied, Some("7")),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateMessageId(id)) if id == "7"));
    }

    #[test]
    fn test_update_status_registers_new_id_and_key() {
        let mut store =
            RecordStore::from_records(vec![record("Acme", ApplicationStatus::Applied, Some("1"))])
                .unwrap();

        store
            .update_status(RowId(0), ApplicationStatus::Interview, Some("2".to_string()))
            .unwrap();

        let updated = store.get(RowId(0)).unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interview);
        assert_eq!(updated.message_id.as_deref(), Some("2"));
        assert!(store.contains_message_id("1"));
        assert!(store.contains_message_id("2"));
        assert!(store.contains_identity(&IdentityKey::new(
            "Analyst",
            "Acme",
            ApplicationStatus::Applied
        )));
        assert!(store.contains_identity(&IdentityKey::new(
            "Analyst",
            "Acme",
            ApplicationStatus::Interview
        )));
    }

    #[test]
    fn test_update_without_id_keeps_old_id() {
        let mut store =
            RecordStore::from_records(vec![record("Acme", ApplicationStatus::Applied, Some("1"))])
                .unwrap();
        store
            .update_status(RowId(0), ApplicationStatus::Offer, None)
            .unwrap();
        assert_eq!(store.get(RowId(0)).unwrap().message_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_register_identity_without_row() {
        let mut store = RecordStore::new();
        let key = IdentityKey::new("Interview invitation", "Acme", ApplicationStatus::Interview);
        store.register_identity(key.clone());
        assert!(store.contains_identity(&key));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_unknown_row() {
        let mut store = RecordStore::new();
        let result = store.update_status(RowId(3), ApplicationStatus::Offer, None);
        assert!(matches!(result, Err(StoreError::NoSuchRow(3))));
    }
}
