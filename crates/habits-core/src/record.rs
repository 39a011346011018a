//! Record: one dated log entry for a habit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, habit::Habit};

/// A persisted record, denormalised with its parent habit's descriptive
/// fields.
///
/// The `habit_*` fields are filled from a left join at read time and are left
/// empty when the parent habit cannot be found. Empty ones are omitted from
/// the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub id:                i64,
  #[serde(rename = "fecha")]
  pub date:              NaiveDate,
  #[serde(rename = "completado", default)]
  pub completed:         bool,
  #[serde(rename = "notas", default)]
  pub notes:             String,
  #[serde(rename = "habito_id")]
  pub habit_id:          i64,
  #[serde(rename = "habito_nombre", default, skip_serializing_if = "String::is_empty")]
  pub habit_name:        String,
  #[serde(rename = "habito_descripcion", default, skip_serializing_if = "String::is_empty")]
  pub habit_description: String,
  #[serde(rename = "habito_meta", default, skip_serializing_if = "String::is_empty")]
  pub habit_target:      String,
}

impl Record {
  /// Copy the descriptive fields of `habit` onto this record.
  pub fn with_habit(mut self, habit: &Habit) -> Self {
    self.habit_name = habit.name.clone();
    self.habit_description = habit.description.clone();
    self.habit_target = habit.target_frequency.clone();
    self
  }
}

/// Input for creating or overwriting a record.
///
/// `date` is kept as the raw string the client sent; the store parses it and
/// reports an unparseable date as a storage error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
  pub date:      String,
  pub completed: bool,
  pub notes:     String,
  pub habit_id:  i64,
}

impl NewRecord {
  pub fn new(habit_id: i64, date: impl Into<String>) -> Self {
    Self {
      date: date.into(),
      habit_id,
      ..Self::default()
    }
  }

  pub fn completed(mut self, completed: bool) -> Self {
    self.completed = completed;
    self
  }

  pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
    self.notes = notes.into();
    self
  }

  /// A record needs a non-zero habit id and a non-empty date. Only create
  /// enforces this.
  pub fn ensure_required(&self) -> Result<()> {
    if self.habit_id == 0 || self.date.is_empty() {
      return Err(Error::MissingRecordFields);
    }
    Ok(())
  }
}
