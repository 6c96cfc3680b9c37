pub mod classifier;
pub mod config;
pub mod email;
pub mod error;
pub mod pipeline;
pub mod sanitize;
pub mod store;

pub use classifier::{should_update, ApplicationStatus, Classification, Classifier, MessageFilter};
pub use config::{load_config, load_config_from_str, TitleStrategy, TrackerConfig};
pub use email::InboundEmail;
pub use error::{ConfigError, EmailError, Result, StoreError, TrackerError};
pub use pipeline::{IngestPipeline, IngestReport, MessageOutcome, PipelineError, SkipReason};
pub use store::{
    persist_report, JsonRecordFile, JobApplicationRecord, RecordRepository, RecordStore, RowId,
};
