//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::ErrorResponse;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A store fault. `message` is what the client sees; `source` is only
  /// logged.
  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Map a service error onto an HTTP error. `fault_message` replaces the
  /// details of a store fault in the response body.
  pub fn from_service(err: roster_core::Error, fault_message: &'static str) -> Self {
    use roster_core::Error;

    match err {
      Error::InvalidInput(m) => Self::BadRequest(m),
      Error::InvalidIdentifier(id) => Self::BadRequest(format!("Invalid contact id: {id:?}")),
      Error::NotFound(_) => Self::NotFound("Contact not found".to_owned()),
      Error::Validation(v) => Self::BadRequest(format!("Validation failed: {v}")),
      Error::Store(source) => Self::Store { message: fault_message, source },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Store { message, source } => {
        tracing::error!(error = %source, "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
      }
    };
    (status, Json(ErrorResponse::new(message))).into_response()
  }
}
