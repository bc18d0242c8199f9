//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by a [`ContactService`] over any
//! [`roster_core::store::ContactStore`]. CORS, tracing and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new()
//!   .nest("/api", roster_api::api_router(service))
//!   .merge(roster_api::openapi::docs_router())
//! ```

pub mod contacts;
pub mod envelope;
pub mod error;
pub mod openapi;

use axum::{
  Router,
  routing::{get, put},
};
use roster_core::{service::ContactService, store::ContactStore};

pub use error::ApiError;

/// Build the contacts API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: ContactService<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>))
    .route("/contacts/{id}", put(contacts::update::<S>))
    .with_state(service)
}
