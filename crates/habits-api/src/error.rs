//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is flattened to a status code and a plain message. Storage
//! errors carry the driver's message through unchanged.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body or path could not be decoded.
  #[error("{0}")]
  BadRequest(String),

  /// A required field was missing.
  #[error(transparent)]
  Invalid(#[from] habits_core::Error),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Store(#[source] BoxError),

  #[error("{context}: {source}")]
  StoreContext {
    context: &'static str,
    #[source]
    source:  BoxError,
  },
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  /// Like [`ApiError::store`], with `context` prefixed to the message.
  pub fn store_context<E>(context: &'static str, e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::StoreContext { context, source: Box::new(e) }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) | ApiError::StoreContext { .. } => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, self.to_string()).into_response()
  }
}
