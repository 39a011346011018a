//! Request body extractor.
//!
//! Unlike [`axum::Json`], [`JsonBody`] ignores the request `Content-Type` and
//! turns every decode failure into a `400` carrying the decoder's message.

use axum::{
  body::Bytes,
  extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON request body decoded into `T`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    serde_json::from_slice(&bytes)
      .map(JsonBody)
      .map_err(|e| ApiError::BadRequest(e.to_string()))
  }
}
