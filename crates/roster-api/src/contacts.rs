//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts` | Optional `search`, `sort`, `limit` |
//! | `PUT`  | `/contacts/{id}` | Body: JSON object of field → value; 404 if not found |

use std::{fmt, str::FromStr};

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use roster_core::{query::ListParams, service::ContactService, store::ContactStore};
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::{
  envelope::{ContactResponse, ErrorResponse, ListResponse},
  error::ApiError,
};

const FETCH_FAILED: &str = "Failed to fetch contacts";
const UPDATE_FAILED: &str = "Failed to update contact";

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
  /// Case-insensitive substring matched against name or company.
  #[param(example = "Pfizer")]
  pub search: Option<String>,
  /// Field to sort ascending by, e.g. `name` or `createdAt`.
  #[param(example = "name")]
  pub sort:   Option<String>,
  /// Maximum number of records to return; 0 or absent means no limit.
  #[param(example = 100)]
  #[serde(default, deserialize_with = "empty_string_as_none")]
  pub limit:  Option<u64>,
}

impl From<ListQuery> for ListParams {
  fn from(q: ListQuery) -> Self {
    ListParams { search: q.search, sort: q.sort, limit: q.limit }
  }
}

/// Treat `?limit=` the same as an absent `limit`.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
  T::Err: fmt::Display,
{
  match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => s.parse().map(Some).map_err(de::Error::custom),
  }
}

/// `GET /contacts[?search=...][&sort=...][&limit=...]`
#[utoipa::path(
  get,
  path = "/api/contacts",
  tag = "Contacts",
  summary = "List or search contacts",
  description = "Fetch contacts, optionally filtered by a case-insensitive name/company \
                 search, sorted ascending by one field and capped by `limit`. \
                 Pagination is left to the client.",
  params(ListQuery),
  responses(
    (status = 200, description = "Contacts fetched successfully", body = ListResponse),
    (status = 400, description = "Malformed query parameter", body = ErrorResponse),
    (status = 500, description = "Store fault", body = ErrorResponse)
  )
)]
pub async fn list<S>(
  State(service): State<ContactService<S>>,
  query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: ContactStore,
{
  let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let params = ListParams::from(query);

  let contacts = service
    .list(&params)
    .await
    .map_err(|e| ApiError::from_service(e, FETCH_FAILED))?;

  Ok(Json(ListResponse::new(contacts)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// The fields `PUT /contacts/{id}` will change. Any other key in the body is
/// ignored.
#[derive(Debug, ToSchema)]
#[schema(example = json!({ "company": "Pfizer", "email": "john.doe@pfizer.com" }))]
pub struct ContactUpdate {
  pub name:                  Option<String>,
  pub title:                 Option<String>,
  pub level:                 Option<String>,
  pub company:               Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin:              Option<String>,
  pub email_check_status:    Option<String>,
  pub linkedin_check_status: Option<String>,
}

/// `PUT /contacts/{id}`, body: `{"company":"Pfizer", ...}`
#[utoipa::path(
  put,
  path = "/api/contacts/{id}",
  tag = "Contacts",
  summary = "Update a contact (inline edit)",
  description = "Updates one or more editable fields of a contact. Keys outside the \
                 editable set are ignored.",
  params(("id" = String, Path, description = "Contact id (UUID)", example = "3f2b8c1e-6d4a-4f0e-9a57-1c2d3e4f5a6b")),
  request_body(content = ContactUpdate, description = "Field → new value", content_type = "application/json"),
  responses(
    (status = 200, description = "Contact updated successfully", body = ContactResponse),
    (status = 400, description = "Invalid id, empty body or invalid field value", body = ErrorResponse),
    (status = 404, description = "Contact not found", body = ErrorResponse),
    (status = 500, description = "Store fault", body = ErrorResponse)
  )
)]
pub async fn update<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError>
where
  S: ContactStore,
{
  let payload = match body {
    Ok(Json(Value::Object(map))) => Some(map),
    Ok(Json(other)) => {
      tracing::debug!(body = %other, "update body is not a JSON object");
      None
    }
    Err(rejection) => {
      tracing::debug!(%rejection, "unreadable update body");
      None
    }
  };

  let contact = service
    .update(&id, payload.as_ref())
    .await
    .map_err(|e| ApiError::from_service(e, UPDATE_FAILED))?;

  tracing::info!(contact_id = %contact.id, "contact updated");
  Ok(Json(ContactResponse::new(contact)))
}
