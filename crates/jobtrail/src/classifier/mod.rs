//! Keyword and pattern heuristics: relevance filter, field extraction and the
//! status hierarchy.

mod engine;
pub mod extract;
pub mod filter;
pub mod status;

pub use engine::{Classification, Classifier, CompanySource};
pub use filter::{FilterDecision, MessageFilter};
pub use status::{should_update, ApplicationStatus};
