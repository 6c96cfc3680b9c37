use chrono::NaiveDate;

use crate::email::InboundEmail;

/// Intermediate results for one message as it moves through the steps.
pub struct MessageContext<'a> {
    // Input
    pub email: &'a InboundEmail,

    // Decoded subject, set by step_filter
    pub subject: String,

    // Header-derived fields, set by step_headers
    pub date: Option<NaiveDate>,
    pub sender: String,
}

impl<'a> MessageContext<'a> {
    pub fn new(email: &'a InboundEmail) -> Self {
        Self {
            email,
            subject: String::new(),
            date: None,
            sender: String::new(),
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.email.uid.as_deref()
    }
}
