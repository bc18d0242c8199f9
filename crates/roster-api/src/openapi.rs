//! Generated OpenAPI document. The raw JSON is served at
//! `/api-docs/openapi.json` and a browsable reference at `/api-docs`.

use axum::{Json, Router, routing::get};
use roster_core::contact::{Contact, ContactId};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
  contacts::{self, ContactUpdate},
  envelope::{ContactResponse, ErrorResponse, ListResponse},
};

/// Path the JSON document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Path of the interactive API reference.
pub const DOCS_UI_PATH: &str = "/api-docs";

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Roster Contacts API",
    version = "1.0.0",
    description = "List, search and inline-edit contacts in the directory.",
    contact(name = "cGxP Tech", email = "support@cgxptech.com")
  ),
  servers((url = "http://localhost:5000", description = "Local development server")),
  paths(contacts::list, contacts::update),
  components(schemas(
    Contact,
    ContactId,
    ContactUpdate,
    ListResponse,
    ContactResponse,
    ErrorResponse
  )),
  tags((name = "Contacts", description = "Contact directory operations"))
)]
pub struct ApiDoc;

async fn document() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }

/// Router serving [`ApiDoc`] at [`OPENAPI_PATH`] and the reference UI at
/// [`DOCS_UI_PATH`].
pub fn docs_router() -> Router<()> {
  Router::new()
    .route(OPENAPI_PATH, get(document))
    .merge(Scalar::with_url(DOCS_UI_PATH, ApiDoc::openapi()))
}
