use thiserror::Error;

/// A per-message failure. Always caught by the batch loop.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Email could not be read: {0}")]
    Email(#[from] crate::error::EmailError),

    #[error("Record store rejected the change: {0}")]
    Store(#[from] crate::error::StoreError),
}
