use std::fmt;

use crate::classifier::FilterDecision;
use crate::store::RowId;

/// What happened to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Created(RowId),
    Updated(RowId),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The message id is already tracked.
    AlreadyProcessed,
    /// Rejected by the label or keyword gates.
    Filtered(FilterDecision),
    /// Same (title, company, status) as a tracked record.
    Duplicate,
    /// The message could not be handled.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyProcessed => write!(f, "already processed"),
            Self::Filtered(FilterDecision::NotRelevant) => write!(f, "not a job application"),
            Self::Filtered(FilterDecision::Blacklisted { term }) => {
                write!(f, "blacklisted (matched: {})", term)
            }
            Self::Filtered(FilterDecision::SkippedLabel { label }) => {
                write!(f, "skipped label {}", label)
            }
            Self::Filtered(FilterDecision::Accept) => write!(f, "accepted"),
            Self::Duplicate => write!(f, "duplicate of a tracked record"),
            Self::Failed(error) => write!(f, "failed: {}", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMessage {
    pub uid: Option<String>,
    pub reason: SkipReason,
}

/// Result of one batch: rows to append and rows to rewrite.
///
/// A row created in this batch is listed only under `created`, even if a
/// later message in the same batch advanced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub created: Vec<RowId>,
    pub updated: Vec<RowId>,
    pub skipped: Vec<SkippedMessage>,
}

impl IngestReport {
    pub fn record(&mut self, uid: Option<&str>, outcome: MessageOutcome) {
        match outcome {
            MessageOutcome::Created(row) => self.created.push(row),
            MessageOutcome::Updated(row) => {
                if !self.created.contains(&row) && !self.updated.contains(&row) {
                    self.updated.push(row);
                }
            }
            MessageOutcome::Skipped(reason) => self.skipped.push(SkippedMessage {
                uid: uid.map(str::to_string),
                reason,
            }),
        }
    }

    /// True when nothing needs persisting.
    pub fn has_changes(&self) -> bool {
        !self.created.is_empty() || !self.updated.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SkippedMessage> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Failed(_)))
    }
}
