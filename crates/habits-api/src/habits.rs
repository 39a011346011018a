//! Handlers for `/habitos` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/habitos`     | Newest first |
//! | `POST`   | `/habitos`     | Body: [`HabitBody`]; returns 200 + stored habit |
//! | `PUT`    | `/habitos/:id` | Full overwrite; 200 even if `id` does not exist |
//! | `DELETE` | `/habitos/:id` | 204, or 404 if nothing was deleted |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use habits_core::{
  habit::{Habit, NewHabit},
  store::HabitStore,
};
use serde::Deserialize;

use crate::{error::ApiError, extract::JsonBody};

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /habitos` and `PUT /habitos/:id`.
///
/// Missing or `null` fields decode as empty strings. An `id` field, if sent,
/// is ignored. Capitalised and upper-case key spellings are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HabitBody {
  #[serde(alias = "Nombre", alias = "NOMBRE")]
  pub nombre:          Option<String>,
  #[serde(alias = "Descripcion", alias = "DESCRIPCION")]
  pub descripcion:     Option<String>,
  #[serde(alias = "Meta_frecuencia", alias = "Meta_Frecuencia", alias = "META_FRECUENCIA")]
  pub meta_frecuencia: Option<String>,
}

impl From<HabitBody> for NewHabit {
  fn from(b: HabitBody) -> Self {
    NewHabit {
      name:             b.nombre.unwrap_or_default(),
      description:      b.descripcion.unwrap_or_default(),
      target_frequency: b.meta_frecuencia.unwrap_or_default(),
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /habitos`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Habit>>, ApiError>
where
  S: HabitStore,
{
  let habits = store.list_habits().await.map_err(ApiError::store)?;
  Ok(Json(habits))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /habitos`: returns 200 (not 201) + the stored [`Habit`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<HabitBody>,
) -> Result<Json<Habit>, ApiError>
where
  S: HabitStore,
{
  let input = NewHabit::from(body);
  input.ensure_required()?;

  let habit = store.create_habit(input).await.map_err(ApiError::store)?;
  Ok(Json(habit))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /habitos/:id`: empty 200 body, whether or not a row matched.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  JsonBody(body): JsonBody<HabitBody>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  let changed = store
    .update_habit(id, NewHabit::from(body))
    .await
    .map_err(ApiError::store)?;
  if changed == 0 {
    tracing::debug!(id, "update matched no habit");
  }
  Ok(StatusCode::OK)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /habitos/:id`
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
    .map_err(|e| ApiError::store_context("Error al eliminar hábito", e))?;
  let deleted = store
    .delete_habit(id)
    .await
    .map_err(|e| ApiError::store_context("Error al eliminar hábito", e))?;
  if !deleted {
    return Err(ApiError::NotFound("Hábito no encontrado".to_owned()));
  }
  Ok(StatusCode::NO_CONTENT)
}
