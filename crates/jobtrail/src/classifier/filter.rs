//! Relevance gate applied before classification.

use log::debug;

use crate::config::FilterConfig;

/// Outcome of running a message through the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Accept,
    /// Carries a mailbox label listed in `skip_labels`.
    SkippedLabel { label: String },
    /// No inclusion phrase in the subject.
    NotRelevant,
    /// Included, but the subject contains a blacklisted phrase.
    Blacklisted { term: String },
}

impl FilterDecision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

pub struct MessageFilter {
    include: Vec<String>,
    blacklist: Vec<String>,
    skip_labels: Vec<String>,
}

impl MessageFilter {
    pub fn new(config: &FilterConfig) -> Self {
        // Stored lower-cased so matching is case-insensitive.
        let lower =
            |items: &[String]| -> Vec<String> { items.iter().map(|s| s.to_lowercase()).collect() };
        Self {
            include: lower(&config.include),
            blacklist: lower(&config.blacklist),
            skip_labels: config.skip_labels.iter().map(|s| s.to_uppercase()).collect(),
        }
    }

    /// Decides whether a decoded subject is a job-application signal.
    ///
    /// Inclusion and exclusion are each OR-combined and exclusion wins. The
    /// reported blacklist term is the first one in configured order.
    pub fn evaluate(&self, subject: &str) -> FilterDecision {
        let subject = subject.to_lowercase();

        if !self.include.iter().any(|kw| subject.contains(kw.as_str())) {
            return FilterDecision::NotRelevant;
        }

        if let Some(term) = self
            .blacklist
            .iter()
            .find(|term| subject.contains(term.as_str()))
        {
            debug!("Subject {:?} matched blacklist term {:?}", subject, term);
            return FilterDecision::Blacklisted { term: term.clone() };
        }

        FilterDecision::Accept
    }

    /// Runs the label gate, then the subject gates.
    pub fn evaluate_message(&self, subject: &str, labels: &[String]) -> FilterDecision {
        for label in labels {
            let upper = label.to_uppercase();
            if let Some(skip) = self
                .skip_labels
                .iter()
                .find(|skip| upper.contains(skip.as_str()))
            {
                return FilterDecision::SkippedLabel {
                    label: skip.clone(),
                };
            }
        }

        self.evaluate(subject)
    }
}
