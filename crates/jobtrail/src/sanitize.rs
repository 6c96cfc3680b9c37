//! Helpers for sanitizing data before it enters tracing span attributes.
//!
//! Mailbox contents are personal; spans carry only what is needed to
//! correlate a message with its log lines.

use std::path::Path;

/// Reduces a sender to its mail domain.
///
/// - `"Acme Careers <jobs@acme.com>"` → `"acme.com"`
/// - `"Recruiting Team"` → `"<unknown>"`
pub fn redact_sender(sender: &str) -> String {
    sender
        .rsplit('<')
        .next()
        .and_then(|address| address.split('>').next())
        .and_then(|address| address.rsplit_once('@'))
        .map(|(_, domain)| domain.trim())
        .filter(|domain| !domain.is_empty())
        .unwrap_or("<unknown>")
        .to_lowercase()
}

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}
