//! Subject decoding and Date header parsing.
//!
//! Both functions are total: a value that cannot be decoded or parsed falls
//! back to something usable instead of failing the message.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDate};
use mail_parser::MessageParser;

/// Decodes RFC 2047 encoded-words in a raw Subject value.
///
/// Returns the raw value unchanged when it carries no encoded-words or when
/// decoding fails. Header folding is unfolded; case and inner whitespace are
/// left alone.
pub fn decode_subject(raw: &str) -> String {
    if !raw.contains("=?") {
        return unfold(raw).into_owned();
    }

    let header = format!("Subject: {}\r\n\r\n", raw.trim());
    MessageParser::default()
        .parse(header.as_bytes())
        .and_then(|message| message.subject().map(str::to_string))
        .unwrap_or_else(|| raw.to_string())
}

fn unfold(raw: &str) -> Cow<'_, str> {
    if raw.contains(['\r', '\n']) {
        Cow::Owned(
            raw.split(['\r', '\n'])
                .filter(|line| !line.is_empty())
                .map(str::trim_start)
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        Cow::Borrowed(raw)
    }
}

fn normalize_datetime(mut dt: &str) -> Cow<'_, str> {
    // chrono rejects a trailing zone comment such as "(UTC)".
    if dt.trim_end().ends_with(')') {
        if let Some(pos) = dt.rfind('(') {
            dt = &dt[..pos];
        }
    }
    dt = dt.trim();
    // -0000 means "unknown local zone"; read it as UTC.
    if let Some(stripped) = dt.strip_suffix("-0000") {
        Cow::Owned(format!("{}+0000", stripped))
    } else {
        Cow::Borrowed(dt)
    }
}

/// Parses the calendar date a message was sent on, in the sender's zone.
///
/// A missing or unparsable header yields today's local date.
pub fn parse_sent_date(raw: Option<&str>) -> NaiveDate {
    raw.and_then(|value| DateTime::parse_from_rfc2822(&normalize_datetime(value)).ok())
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| Local::now().date_naive())
}
