use log::warn;
use regex::Regex;

use crate::config::{ClassifierConfig, TitleStrategy};

use super::extract::{self, Boilerplate};
use super::status::ApplicationStatus;

const UNKNOWN_COMPANY: &str = "Unknown";

/// Which heuristic produced the company name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySource {
    /// An "at/from <company>" pattern in the subject.
    Subject,
    /// The sender's mail domain.
    SenderDomain,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub title: String,
    pub company: String,
    pub status: ApplicationStatus,
    pub company_source: CompanySource,
}

/// Derives (title, company, status) from a message's subject, sender and body.
pub struct Classifier {
    body_rejection: Vec<String>,
    rejection: Vec<String>,
    offer: Vec<String>,
    interview: Vec<String>,
    company_patterns: Vec<Regex>,
    title_patterns: Vec<Regex>,
    boilerplate: Vec<Boilerplate>,
    title_strategy: TitleStrategy,
    edges: Regex,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };

        Self {
            body_rejection: lower(&config.body_rejection),
            rejection: lower(&config.rejection),
            offer: lower(&config.offer),
            interview: lower(&config.interview),
            company_patterns: compile_all("company_patterns", &config.company_patterns),
            title_patterns: compile_all("title_patterns", &config.title_patterns),
            boilerplate: config
                .boilerplate
                .iter()
                .filter_map(|phrase| Boilerplate::new(phrase))
                .collect(),
            title_strategy: config.title_strategy,
            edges: extract::edge_trimmer(),
        }
    }

    pub fn classify(&self, subject: &str, sender: &str, body: Option<&str>) -> Classification {
        let status = self.infer_status(subject, body);
        let (company, company_source) = self.extract_company(subject, sender);

        // Subtractive cleanup is only trusted when the company came from the
        // subject, since that is the text it excises.
        let strategy = match company_source {
            CompanySource::Subject => self.title_strategy,
            _ => TitleStrategy::PatternWaterfall,
        };
        let title = self.extract_title_with(strategy, subject, Some(&company));

        Classification {
            title,
            company,
            status,
            company_source,
        }
    }

    /// First match wins: body rejection, subject rejection, offer, interview.
    pub fn infer_status(&self, subject: &str, body: Option<&str>) -> ApplicationStatus {
        if let Some(body) = body {
            let body = body.to_lowercase();
            if contains_any(&body, &self.body_rejection) {
                return ApplicationStatus::Rejected;
            }
        }

        let subject = subject.to_lowercase();
        if contains_any(&subject, &self.rejection) {
            ApplicationStatus::Rejected
        } else if contains_any(&subject, &self.offer) {
            ApplicationStatus::Offer
        } else if contains_any(&subject, &self.interview) {
            ApplicationStatus::Interview
        } else {
            ApplicationStatus::Applied
        }
    }

    pub fn extract_company(&self, subject: &str, sender: &str) -> (String, CompanySource) {
        if let Some(company) = extract::first_capture(&self.company_patterns, subject) {
            return (company, CompanySource::Subject);
        }
        match extract::company_from_sender(sender) {
            Some(company) => (company, CompanySource::SenderDomain),
            None => (UNKNOWN_COMPANY.to_string(), CompanySource::Unknown),
        }
    }

    /// Extracts a title with an explicit strategy.
    pub fn extract_title_with(
        &self,
        strategy: TitleStrategy,
        subject: &str,
        company: Option<&str>,
    ) -> String {
        match strategy {
            TitleStrategy::PatternWaterfall => {
                extract::first_capture(&self.title_patterns, subject)
                    .unwrap_or_else(|| subject.trim().to_string())
            }
            TitleStrategy::SubtractiveCleanup => {
                extract::subtract_boilerplate(subject, &self.boilerplate, company, &self.edges)
            }
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

fn compile_all(table: &str, patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Skipping invalid pattern in {}: {}", table, e);
                None
            }
        })
        .collect()
}
