//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Record dates are stored as `YYYY-MM-DD` strings. Nullable text columns read
//! back as empty strings.

use chrono::{DateTime, NaiveDate};
use habits_core::{habit::Habit, record::Record};
use rusqlite::Row;

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a client-supplied date. Accepts a plain calendar date or a full
/// RFC 3339 timestamp, whose date part is kept.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  let trimmed = s.trim();
  NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
    .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
    .map_err(|_| Error::InvalidDate(s.to_owned()))
}

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `habits` row.
pub struct RawHabit {
  pub id:               i64,
  pub name:             String,
  pub description:      String,
  pub target_frequency: Option<String>,
}

impl RawHabit {
  /// Expects columns `id, name, description, target_frequency`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      name:             row.get(1)?,
      description:      row.get(2)?,
      target_frequency: row.get(3)?,
    })
  }

  pub fn into_habit(self) -> Habit {
    Habit {
      id:               self.id,
      name:             self.name,
      description:      self.description,
      target_frequency: self.target_frequency.unwrap_or_default(),
    }
  }
}

/// Raw values read from a `records` row left-joined with `habits`.
pub struct RawRecord {
  // records columns
  pub id:                i64,
  pub date:              String,
  pub completed:         Option<bool>,
  pub notes:             Option<String>,
  pub habit_id:          Option<i64>,
  // habits join, already COALESCEd
  pub habit_name:        String,
  pub habit_description: String,
  pub habit_target:      String,
}

impl RawRecord {
  /// Expects columns `id, date, completed, notes, habit_id, habit_name,
  /// habit_description, habit_target`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      date:              row.get(1)?,
      completed:         row.get(2)?,
      notes:             row.get(3)?,
      habit_id:          row.get(4)?,
      habit_name:        row.get(5)?,
      habit_description: row.get(6)?,
      habit_target:      row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      id:                self.id,
      date:              decode_date(&self.date)?,
      completed:         self.completed.unwrap_or(false),
      notes:             self.notes.unwrap_or_default(),
      habit_id:          self.habit_id.unwrap_or(0),
      habit_name:        self.habit_name,
      habit_description: self.habit_description,
      habit_target:      self.habit_target,
    })
  }
}
