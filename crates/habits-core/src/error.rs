//! Error types for `habits-core`.

use thiserror::Error;

/// A write was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("nombre y descripcion son requeridos")]
  MissingHabitFields,

  #[error("Debe tener habito_id y fecha válidos")]
  MissingRecordFields,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
