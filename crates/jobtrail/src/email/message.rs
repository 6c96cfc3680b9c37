//! The message shape the ingest pipeline consumes.

use std::path::Path;

use log::debug;
use mail_parser::{Message, MessageParser};

use crate::error::EmailError;

/// One retrieved message, as handed over by a mail source.
///
/// `subject` and `date` are raw header values; decoding happens in the
/// pipeline so that a bad header only degrades that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundEmail {
    /// Stable identifier of the message in its source (IMAP UID or Message-ID).
    pub uid: Option<String>,
    /// Raw Subject header, possibly RFC 2047 encoded.
    pub subject: String,
    /// From header, for display.
    pub from: String,
    /// Raw Date header.
    pub date: Option<String>,
    /// Plain text body, or text rendered from the HTML body.
    pub body: Option<String>,
    /// Mailbox labels such as Gmail's `X-Gmail-Labels`.
    pub labels: Vec<String>,
}

impl InboundEmail {
    /// Parses a raw RFC 5322 message.
    ///
    /// `uid` overrides the Message-ID header as the message identifier.
    pub fn from_raw(raw: &[u8], uid: Option<String>) -> Result<Self, EmailError> {
        let message = MessageParser::default()
            .parse(raw)
            .ok_or_else(|| EmailError::ParseError("Failed to parse email message".to_string()))?;

        if message.headers().is_empty() {
            return Err(EmailError::ParseError(
                "Message has no headers".to_string(),
            ));
        }

        let uid = uid.or_else(|| message.message_id().map(str::to_string));
        let subject = message
            .header_raw("Subject")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let from = sender_of(&message);
        let date = message.header_raw("Date").map(|s| s.trim().to_string());
        let body = message
            .body_text(0)
            .map(|text| text.into_owned())
            .filter(|text| !text.trim().is_empty());
        let labels = message
            .header_raw("X-Gmail-Labels")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            "Parsed email uid={:?} subject={:?}",
            uid,
            if subject.is_empty() { "(no subject)" } else { subject.as_str() }
        );

        Ok(Self {
            uid,
            subject,
            from,
            date,
            body,
            labels,
        })
    }

    /// Reads and parses a single `.eml` file.
    pub fn from_file(path: &Path) -> Result<Self, EmailError> {
        let raw = std::fs::read(path).map_err(|e| EmailError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_raw(&raw, None)
    }
}

fn sender_of(message: &Message) -> String {
    message
        .from()
        .and_then(|addr| addr.first().map(format_address))
        .or_else(|| message.header_raw("From").map(|s| s.trim().to_string()))
        .unwrap_or_default()
}

/// Formats an address as "Name <email@example.com>", or just the address.
fn format_address(addr: &mail_parser::Addr) -> String {
    if let Some(name) = addr.name() {
        format!("{} <{}>", name, addr.address().unwrap_or_default())
    } else {
        addr.address().unwrap_or_default().to_string()
    }
}
