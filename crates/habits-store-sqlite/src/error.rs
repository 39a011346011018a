//! Error type for `habits-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A record date that is not a calendar date.
  #[error("invalid input syntax for type date: {0:?}")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
