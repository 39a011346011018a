//! Handlers for `/registros` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/registros`     | Newest first, joined with the parent habit |
//! | `POST`   | `/registros`     | Body: [`RecordBody`]; returns 201 + denormalised record |
//! | `PUT`    | `/registros/:id` | Full overwrite; 200 even if `id` does not exist |
//! | `DELETE` | `/registros/:id` | 204, or 404 if nothing was deleted |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use habits_core::{
  record::{NewRecord, Record},
  store::HabitStore,
};
use serde::Deserialize;

use crate::{error::ApiError, extract::JsonBody};

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /registros` and `PUT /registros/:id`.
///
/// Missing or `null` fields fall back to their zero values, so a missing
/// `habito_id` reads as `0`. Denormalised `habito_*` fields are ignored.
/// Capitalised and upper-case key spellings are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordBody {
  #[serde(alias = "Fecha", alias = "FECHA")]
  pub fecha:      Option<String>,
  #[serde(alias = "Completado", alias = "COMPLETADO")]
  pub completado: Option<bool>,
  #[serde(alias = "Notas", alias = "NOTAS")]
  pub notas:      Option<String>,
  #[serde(alias = "Habito_id", alias = "Habito_Id", alias = "HABITO_ID")]
  pub habito_id:  Option<i64>,
}

impl From<RecordBody> for NewRecord {
  fn from(b: RecordBody) -> Self {
    NewRecord {
      date:      b.fecha.unwrap_or_default(),
      completed: b.completado.unwrap_or(false),
      notes:     b.notas.unwrap_or_default(),
      habit_id:  b.habito_id.unwrap_or(0),
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /registros`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Record>>, ApiError>
where
  S: HabitStore,
{
  let records = store.list_records().await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /registros`: returns 201 + the stored [`Record`], with its habit
/// fields filled when the habit could be read back.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<JsonBody<RecordBody>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HabitStore,
{
  let JsonBody(body) = body.map_err(|e| match e {
    ApiError::BadRequest(msg) => ApiError::BadRequest(format!("Error al decodificar JSON: {msg}")),
    other => other,
  })?;
  let input = NewRecord::from(body);
  input.ensure_required()?;

  let record = store
    .create_record(input)
    .await
    .map_err(|e| ApiError::store_context("Error al insertar registro", e))?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /registros/:id`: empty 200 body, whether or not a row matched.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  JsonBody(body): JsonBody<RecordBody>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  let changed = store
    .update_record(id, NewRecord::from(body))
    .await
    .map_err(ApiError::store)?;
  if changed == 0 {
    tracing::debug!(id, "update matched no record");
  }
  Ok(StatusCode::OK)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /registros/:id`
///
/// An `id` that is not an integer is reported as a storage failure (500).
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  let id = raw_id
    .parse::<i64>()
    .map_err(|e| ApiError::store_context("Error al eliminar registro", e))?;
  let deleted = store
    .delete_record(id)
    .await
    .map_err(|e| ApiError::store_context("Error al eliminar registro", e))?;
  if !deleted {
    return Err(ApiError::NotFound("Registro no encontrado".to_owned()));
  }
  Ok(StatusCode::NO_CONTENT)
}
