//! Persistence contract for records, and a JSON file implementation.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::classifier::ApplicationStatus;
use crate::error::StoreError;
use crate::pipeline::IngestReport;

use super::memory::RecordStore;
use super::record::{JobApplicationRecord, RowId};

/// Storage the tracker reads existing records from and writes results to.
pub trait RecordRepository {
    /// All stored records with their row identity, in row order.
    fn load_all(&self) -> Result<Vec<(RowId, JobApplicationRecord)>, StoreError>;

    fn append(&mut self, record: JobApplicationRecord) -> Result<RowId, StoreError>;

    fn update_status(
        &mut self,
        row: RowId,
        status: &ApplicationStatus,
        message_id: Option<&str>,
    ) -> Result<(), StoreError>;
}

impl RecordStore {
    /// Loads every stored record and builds the store from them.
    pub fn load<R: RecordRepository + ?Sized>(repo: &R) -> Result<Self, StoreError> {
        let mut rows = repo.load_all()?;
        rows.sort_by_key(|(row, _)| *row);
        Self::from_records(rows.into_iter().map(|(_, record)| record).collect())
    }
}

/// Writes the created and updated records of a batch to `repo`.
pub fn persist_report<R: RecordRepository + ?Sized>(
    report: &IngestReport,
    store: &RecordStore,
    repo: &mut R,
) -> Result<(), StoreError> {
    for &row in &report.updated {
        let record = store.get(row).ok_or(StoreError::NoSuchRow(row.0))?;
        repo.update_status(row, &record.status, record.message_id.as_deref())?;
    }

    for &row in &report.created {
        let record = store.get(row).ok_or(StoreError::NoSuchRow(row.0))?;
        let stored_at = repo.append(record.clone())?;
        if stored_at != row {
            warn!(
                "Record stored at {} but tracked at {}; storage and store have diverged",
                stored_at, row
            );
        }
    }

    Ok(())
}

/// Records kept as a JSON array in a single file.
///
/// Changes stay in memory until [`JsonRecordFile::save`], which replaces the
/// file through a temporary sibling.
pub struct JsonRecordFile {
    path: PathBuf,
    rows: Vec<JobApplicationRecord>,
}

impl JsonRecordFile {
    /// Opens the file at `path`; a missing file is an empty table.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let rows = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadFile {
                path: path.clone(),
                source: e,
            })?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
                    path: path.clone(),
                    source: e,
                })?
            }
        } else {
            debug!("Record file {} does not exist yet", path.display());
            Vec::new()
        };

        Ok(Self { path, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |e| StoreError::WriteFile {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.rows).map_err(|e| {
            write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;

        info!(
            "Saved {} records to {}",
            self.rows.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl RecordRepository for JsonRecordFile {
    fn load_all(&self) -> Result<Vec<(RowId, JobApplicationRecord)>, StoreError> {
        Ok(self
            .rows
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, record)| (RowId(i), record))
            .collect())
    }

    fn append(&mut self, record: JobApplicationRecord) -> Result<RowId, StoreError> {
        self.rows.push(record);
        Ok(RowId(self.rows.len() - 1))
    }

    fn update_status(
        &mut self,
        row: RowId,
        status: &ApplicationStatus,
        message_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let record = self
            .rows
            .get_mut(row.0)
            .ok_or(StoreError::NoSuchRow(row.0))?;
        record.status = status.clone();
        record.message_id = message_id.map(str::to_string);
        Ok(())
    }
}
