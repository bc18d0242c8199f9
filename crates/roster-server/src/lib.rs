//! HTTP server wiring for Roster.
//!
//! Mounts the contacts API under `/api`, serves the OpenAPI document, and adds
//! CORS and request tracing around both.

use std::path::{Path, PathBuf};

use axum::Router;
use roster_api::{api_router, openapi::docs_router};
use roster_core::{service::ContactService, store::ContactStore};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Allow any origin, method and header on cross-origin requests.
  #[serde(default = "default_cors_allow_any")]
  pub cors_allow_any: bool,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

fn default_cors_allow_any() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           default_host(),
      port:           default_port(),
      store_path:     default_store_path(),
      cors_allow_any: default_cors_allow_any(),
    }
  }
}

impl ServerConfig {
  /// Layer `ROSTER_*` environment variables over the TOML file at `path`.
  /// A missing file is not an error.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

fn cors_layer(config: &ServerConfig) -> CorsLayer {
  if config.cors_allow_any {
    CorsLayer::new()
      .allow_origin(Any)
      .allow_methods(Any)
      .allow_headers(Any)
  } else {
    CorsLayer::new()
  }
}

/// Build the complete application router.
pub fn router<S>(service: ContactService<S>, config: &ServerConfig) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .nest("/api", api_router(service))
    .merge(docs_router())
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer(config))
}

// ─── Integration tests ────────────────────────────────────────────────────────
