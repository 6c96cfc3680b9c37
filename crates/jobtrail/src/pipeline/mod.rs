//! Per-message ingest: filter, classify, resolve identity, merge status.

mod context;
mod error;
mod report;
mod runner;

pub use context::MessageContext;
pub use error::PipelineError;
pub use report::{IngestReport, MessageOutcome, SkipReason, SkippedMessage};
pub use runner::IngestPipeline;
