//! Response envelopes: `{ success, total?, data?, message? }`.

use roster_core::contact::Contact;
use serde::Serialize;
use utoipa::ToSchema;

/// `GET /api/contacts` success body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
  #[schema(example = true)]
  pub success: bool,
  /// Number of records in `data`.
  #[schema(example = 500)]
  pub total:   usize,
  pub data:    Vec<Contact>,
}

impl ListResponse {
  pub fn new(data: Vec<Contact>) -> Self {
    Self { success: true, total: data.len(), data }
  }
}

/// `PUT /api/contacts/{id}` success body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
  #[schema(example = true)]
  pub success: bool,
  pub data:    Contact,
}

impl ContactResponse {
  pub fn new(data: Contact) -> Self { Self { success: true, data } }
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
  #[schema(example = false)]
  pub success: bool,
  #[schema(example = "Contact not found")]
  pub message: String,
}

impl ErrorResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self { success: false, message: message.into() }
  }
}
