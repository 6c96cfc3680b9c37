use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classifier::ApplicationStatus;

/// One tracked job application. Serialized with the tabular column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicationRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Status")]
    pub status: ApplicationStatus,
    #[serde(rename = "Sender")]
    pub sender: String,
    #[serde(rename = "MessageId", default)]
    pub message_id: Option<String>,
}

impl JobApplicationRecord {
    pub fn company_key(&self) -> String {
        company_key(&self.company)
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.title, &self.company, self.status.clone())
    }
}

/// Position of a record in the store, and in the persisted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// Trimmed, lower-cased company name used for grouping.
pub fn company_key(company: &str) -> String {
    company.trim().to_lowercase()
}

/// Fallback identity `(title, company, status)` for records without a
/// reliable message id. Title and company compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    title: String,
    company: String,
    status: ApplicationStatus,
}

impl IdentityKey {
    pub fn new(title: &str, company: &str, status: ApplicationStatus) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            company: company_key(company),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> JobApplicationRecord {
        JobApplicationRecord {
            date: NaiveDate::from_ymd_opt(2025, 4, 28).unwrap(),
            title: "Software Engineer".to_string(),
            company: " Acme Corp ".to_string(),
            status: ApplicationStatus::Applied,
            sender: "hr@acme.com".to_string(),
            message_id: Some("42".to_string()),
        }
    }

    #[test]
    fn test_company_key_normalizes() {
        assert_eq!(record().company_key(), "acme corp");
    }

    #[test]
    fn test_identity_key_ignores_case() {
        assert_eq!(
            record().identity_key(),
            IdentityKey::new("SOFTWARE ENGINEER", "acme corp", ApplicationStatus::Applied)
        );
        assert_ne!(
            record().identity_key(),
            IdentityKey::new("Software Engineer", "Acme Corp", ApplicationStatus::Interview)
        );
    }

    #[test]
    fn test_serializes_with_column_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["Date"], "2025-04-28");
        assert_eq!(json["Job Title"], "Software Engineer");
        assert_eq!(json["Status"], "Applied");
        assert_eq!(json["MessageId"], "42");
    }

    #[test]
    fn test_legacy_row_without_message_id() {
        let json = r#"{
            "Date": "2025-04-24",
            "Job Title": "Help Desk Analyst",
            "Company": "Initech",
            "Status": "On hold",
            "Sender": "jobs@initech.com"
        }"#;
        let record: JobApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.message_id, None);
        assert_eq!(
            record.status,
            ApplicationStatus::Unrecognized("On hold".to_string())
        );
    }
}
