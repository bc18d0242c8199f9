//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers ([`crate::service::ContactService`], `roster-api`) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactId, NewContact},
  patch::ContactPatch,
  query::ContactQuery,
};

/// Abstraction over a contact record store.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a batch of contacts atomically, assigning ids and timestamps.
  ///
  /// Every record is normalised with [`NewContact::normalize`] first; one
  /// invalid record fails the whole batch and nothing is written.
  fn insert_many(
    &self,
    contacts: Vec<NewContact>,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Return the contacts matching `query`, in the requested order.
  fn find<'a>(
    &'a self,
    query: &'a ContactQuery,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Apply `patch` to one contact and bump its `updated_at` in a single atomic
  /// write. Returns the updated record, or `None` if no contact has `id`.
  fn update(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}
