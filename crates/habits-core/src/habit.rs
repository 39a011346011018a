//! Habit: a named recurring activity with an optional target frequency.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A persisted habit.
///
/// Serialised with the wire names the web client expects
/// (`nombre`, `descripcion`, `meta_frecuencia`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
  pub id:               i64,
  #[serde(rename = "nombre")]
  pub name:             String,
  #[serde(rename = "descripcion")]
  pub description:      String,
  #[serde(rename = "meta_frecuencia", default)]
  pub target_frequency: String,
}

/// Input for creating or overwriting a habit. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHabit {
  pub name:             String,
  pub description:      String,
  pub target_frequency: String,
}

impl NewHabit {
  pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      name:             name.into(),
      description:      description.into(),
      target_frequency: String::new(),
    }
  }

  pub fn with_target_frequency(mut self, frequency: impl Into<String>) -> Self {
    self.target_frequency = frequency.into();
    self
  }

  /// Name and description must both be non-empty. Only create enforces this;
  /// updates overwrite whatever they are given.
  pub fn ensure_required(&self) -> Result<()> {
    if self.name.is_empty() || self.description.is_empty() {
      return Err(Error::MissingHabitFields);
    }
    Ok(())
  }

  /// Attach the store-assigned id.
  pub fn into_habit(self, id: i64) -> Habit {
    Habit {
      id,
      name: self.name,
      description: self.description,
      target_frequency: self.target_frequency,
    }
  }
}
