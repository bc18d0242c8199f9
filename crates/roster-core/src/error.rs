//! Error types for `roster-core`.

use thiserror::Error;

use crate::contact::ContactId;

/// A single field that failed validation on write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
  /// Wire name of the offending field, e.g. `"email"`.
  pub field:  &'static str,
  pub reason: String,
}

impl ValidationError {
  pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
    Self { field, reason: reason.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// The update payload was absent or had no keys.
  #[error("{0}")]
  InvalidInput(String),

  /// The identifier string does not parse as a contact id.
  #[error("invalid contact id: {0:?}")]
  InvalidIdentifier(String),

  #[error("contact not found: {0}")]
  NotFound(ContactId),

  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
