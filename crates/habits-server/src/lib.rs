//! HTTP server for the habit tracker.
//!
//! Wraps the [`habits_api`] router with the response headers the web client
//! needs: permissive CORS on every response, a JSON content type, and a bare
//! `200` for any `OPTIONS` preflight.

use std::{path::Path, sync::Arc};

use axum::{
  Json, Router,
  extract::Request,
  http::{HeaderValue, Method, StatusCode, header},
  middleware::{self, Next},
  response::{IntoResponse, Response},
  routing::get,
};
use habits_core::store::HabitStore;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "habits.db";

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub database_url: String,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML `file`, `HABITS_*` environment
  /// variables and finally `database_url` (normally `DATABASE_URL`).
  pub fn load(file: &Path, database_url: Option<String>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("database_url", DEFAULT_DATABASE_URL)?
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("HABITS"))
      .set_override_option("database_url", database_url)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: HabitStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", habits_api::api_router(store))
    .layer(middleware::from_fn(preflight))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
          header::ACCESS_CONTROL_ALLOW_ORIGIN,
          HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
          header::ACCESS_CONTROL_ALLOW_METHODS,
          HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
          header::ACCESS_CONTROL_ALLOW_HEADERS,
          HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
          header::CONTENT_TYPE,
          HeaderValue::from_static("application/json"),
        )),
    )
}

/// Answer every `OPTIONS` request with an empty `200` before routing.
async fn preflight(req: Request, next: Next) -> Response {
  if req.method() == Method::OPTIONS {
    return StatusCode::OK.into_response();
  }
  next.run(req).await
}

#[derive(Serialize)]
struct HealthBody {
  status: &'static str,
}

async fn health() -> Json<HealthBody> { Json(HealthBody { status: "ok" }) }

// ─── Integration tests ────────────────────────────────────────────────────────
