//! Per-field validation applied on every write.
//!
//! Both the bulk loader (through [`crate::contact::NewContact::normalize`])
//! and the update gatekeeper (through
//! [`crate::patch::ContactPatch::from_payload`]) funnel values through these
//! functions, so a record can never reach the store in a shape the other path
//! would reject.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// `local@domain.tld`, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Trim surrounding whitespace. Blank input becomes `None`.
pub fn normalize_text(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Trim and lower-case an email address, then check its shape.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
  let email = raw.trim().to_lowercase();
  if EMAIL_PATTERN.is_match(&email) {
    Ok(email)
  } else {
    Err(ValidationError::new("email", format!("invalid email format: {raw:?}")))
  }
}

/// Unicode case folding used for `search` matching.
///
/// The store keeps a folded copy of `name` and `company`; the search text is
/// folded the same way before it is handed to the store.
pub fn fold_case(s: &str) -> String { s.to_lowercase() }
