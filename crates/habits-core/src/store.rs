//! The `HabitStore` trait.
//!
//! Implemented by storage backends (e.g. `habits-store-sqlite`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  habit::{Habit, NewHabit},
  record::{NewRecord, Record},
};

/// Abstraction over a habit tracker backend.
///
/// Every method is a single round trip in autocommit mode. Updates do not
/// check that the target exists and report the number of rows they touched;
/// deletes report whether a row was removed.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// All habits, newest (highest id) first.
  fn list_habits(
    &self,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// Insert a habit and return it with its generated id.
  fn create_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Overwrite every field of habit `id`. Returns the number of rows changed.
  fn update_habit(
    &self,
    id: i64,
    input: NewHabit,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete habit `id`. Returns `false` if no such habit existed.
  ///
  /// Fails if records still reference the habit.
  fn delete_habit(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Records ───────────────────────────────────────────────────────────

  /// All records, newest first, each joined with its parent habit.
  fn list_records(
    &self,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Insert a record and return it with its generated id and, when the parent
  /// habit can be read back, its denormalised habit fields.
  ///
  /// Fails if `input.habit_id` does not reference an existing habit.
  fn create_record(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  /// Overwrite every field of record `id`. Returns the number of rows changed.
  fn update_record(
    &self,
    id: i64,
    input: NewRecord,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete record `id`. Returns `false` if no such record existed.
  fn delete_record(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
