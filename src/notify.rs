//! Notification assembly: maps a report onto an addressed message.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{PpeError, Result};
use crate::report::Report;

/// An addressed notification ready for the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Build the notification for a report.
///
/// Both addresses must pass [`validate_address`].
pub fn assemble(report: &Report, from: &str, to: &str) -> Result<NotificationMessage> {
    validate_address("from", from)?;
    validate_address("to", to)?;
    Ok(NotificationMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: report.subject.clone(),
        text_body: report.plain_text.clone(),
        html_body: report.html.clone(),
    })
}

/// Minimal address check: exactly one '@' with non-empty local and domain parts.
pub fn validate_address(field: &str, address: &str) -> Result<()> {
    static ADDRESS_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = ADDRESS_RE.get_or_init(|| regex::Regex::new(r"^[^@]+@[^@]+$").unwrap());

    if !re.is_match(address) {
        return Err(PpeError::configuration(format!(
            "{} address '{}' must contain exactly one '@' with non-empty local and domain parts",
            field, address
        )));
    }
    Ok(())
}
