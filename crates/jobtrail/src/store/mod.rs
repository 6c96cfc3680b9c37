//! Application records, the in-memory store and the persistence contract.

mod memory;
mod record;
mod repository;

pub use memory::RecordStore;
pub use record::{company_key, IdentityKey, JobApplicationRecord, RowId};
pub use repository::{persist_report, JsonRecordFile, RecordRepository};
