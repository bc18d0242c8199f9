//! [`ContactService`]: list/search and the update gatekeeper.
//!
//! The service owns no state besides the injected store handle. The HTTP layer
//! calls it; it calls the store.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
  Error, Result,
  contact::{Contact, ContactId},
  patch::ContactPatch,
  query::{ContactQuery, ListParams},
  store::ContactStore,
};

/// Message reported for an absent or empty update payload.
pub const NO_UPDATE_DATA: &str = "No update data provided";

pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// List contacts matching `params`. Read-only.
  pub async fn list(&self, params: &ListParams) -> Result<Vec<Contact>> {
    let query = ContactQuery::from_params(params);
    self.store.find(&query).await.map_err(Error::store)
  }

  /// Apply the editable subset of `payload` to the contact named by `id`.
  ///
  /// The identifier is checked before anything else and before the store is
  /// touched. A payload whose keys are all outside the allow-list is a no-op
  /// that returns the current record.
  pub async fn update(
    &self,
    id: &str,
    payload: Option<&Map<String, Value>>,
  ) -> Result<Contact> {
    let contact_id: ContactId = id
      .parse()
      .map_err(|_| Error::InvalidIdentifier(id.to_owned()))?;

    let payload = payload
      .filter(|p| !p.is_empty())
      .ok_or_else(|| Error::InvalidInput(NO_UPDATE_DATA.to_owned()))?;

    let patch = ContactPatch::from_payload(payload)?;

    let result = if patch.is_empty() {
      tracing::debug!(%contact_id, "no editable fields in update; returning current record");
      self.store.get(contact_id).await
    } else {
      self.store.update(contact_id, patch).await
    };

    result
      .map_err(Error::store)?
      .ok_or(Error::NotFound(contact_id))
  }
}
