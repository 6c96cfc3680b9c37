//! Builder patterns for creating test messages and records.

#![allow(dead_code)]

use chrono::NaiveDate;
use jobtrail::{ApplicationStatus, InboundEmail, JobApplicationRecord};

/// Builder for `InboundEmail` values as a mail source would hand them over.
pub struct EmailBuilder {
    email: InboundEmail,
}

impl EmailBuilder {
    /// A message with the given subject from `hr@acme.com`, sent 2 May 2025.
    pub fn new(subject: &str) -> Self {
        Self {
            email: InboundEmail {
                uid: None,
                subject: subject.to_string(),
                from: "hr@acme.com".to_string(),
                date: Some("Fri, 2 May 2025 09:30:00 +0000".to_string()),
                body: None,
                labels: Vec::new(),
            },
        }
    }

    pub fn uid(mut self, uid: &str) -> Self {
        self.email.uid = Some(uid.to_string());
        self
    }

    pub fn from(mut self, from: &str) -> Self {
        self.email.from = from.to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.email.date = Some(date.to_string());
        self
    }

    pub fn no_date(mut self) -> Self {
        self.email.date = None;
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.email.body = Some(body.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.email.labels.push(label.to_string());
        self
    }

    pub fn build(self) -> InboundEmail {
        self.email
    }
}

/// Builder for stored `JobApplicationRecord` values.
pub struct RecordBuilder {
    record: JobApplicationRecord,
}

impl RecordBuilder {
    /// An `Applied` record for "Software Engineer" at the given company.
    pub fn new(company: &str) -> Self {
        Self {
            record: JobApplicationRecord {
                date: NaiveDate::from_ymd_opt(2025, 4, 28).unwrap(),
                title: "Software Engineer".to_string(),
                company: company.to_string(),
                status: ApplicationStatus::Applied,
                sender: "hr@acme.com".to_string(),
                message_id: None,
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_string();
        self
    }

    pub fn status(mut self, status: ApplicationStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn message_id(mut self, id: &str) -> Self {
        self.record.message_id = Some(id.to_string());
        self
    }

    pub fn build(self) -> JobApplicationRecord {
        self.record
    }
}
