//! [`SqliteStore`]: the SQLite implementation of [`HabitStore`].

use std::path::{Path, PathBuf};

use habits_core::{
  habit::{Habit, NewHabit},
  record::{NewRecord, Record},
  store::HabitStore,
};

use crate::{
  Result,
  encode::{RawHabit, RawRecord, encode_date, parse_date},
  schema::SCHEMA,
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where a store lives, as parsed from a `DATABASE_URL`-style string.
///
/// Accepted forms are `sqlite://<path>`, `sqlite:<path>` and a bare path.
/// `:memory:` (with or without a scheme) selects a private in-memory database.
/// Anything after a `?` is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
  Memory,
  File(PathBuf),
}

impl DatabaseLocation {
  pub fn from_url(url: &str) -> Self {
    let rest = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);
    let path = rest.split('?').next().unwrap_or(rest);

    if path == ":memory:" {
      DatabaseLocation::Memory
    } else {
      DatabaseLocation::File(PathBuf::from(path))
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A habit store backed by a single SQLite connection.
///
/// Cloning is cheap: the inner connection is reference-counted. All
/// statements are serialised through the connection's worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the store named by a connection string. See [`DatabaseLocation`].
  pub async fn connect(url: &str) -> Result<Self> {
    match DatabaseLocation::from_url(url) {
      DatabaseLocation::Memory => Self::open_in_memory().await,
      DatabaseLocation::File(path) => Self::open(path).await,
    }
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Run a raw SQL batch on the connection.
  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = crate::Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn list_habits(&self) -> Result<Vec<Habit>> {
    let raws: Vec<RawHabit> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, description, target_frequency
           FROM habits
           ORDER BY id DESC",
        )?;
        let rows = stmt
          .query_map([], RawHabit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawHabit::into_habit).collect())
  }

  async fn create_habit(&self, input: NewHabit) -> Result<Habit> {
    let name        = input.name.clone();
    let description = input.description.clone();
    let frequency   = input.target_frequency.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO habits (name, description, target_frequency) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, description, frequency],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(input.into_habit(id))
  }

  async fn update_habit(&self, id: i64, input: NewHabit) -> Result<u64> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE habits SET name = ?1, description = ?2, target_frequency = ?3
           WHERE id = ?4",
          rusqlite::params![input.name, input.description, input.target_frequency, id],
        )?)
      })
      .await?;

    Ok(changed as u64)
  }

  async fn delete_habit(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM habits WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Records ───────────────────────────────────────────────────────────────

  async fn list_records(&self) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT
             r.id, r.date, r.completed, r.notes, r.habit_id,
             COALESCE(h.name, '')             AS habit_name,
             COALESCE(h.description, '')      AS habit_description,
             COALESCE(h.target_frequency, '') AS habit_target
           FROM records r
           LEFT JOIN habits h ON r.habit_id = h.id
           ORDER BY r.id DESC",
        )?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn create_record(&self, input: NewRecord) -> Result<Record> {
    let date      = parse_date(&input.date)?;
    let date_str  = encode_date(date);
    let notes     = input.notes.clone();
    let completed = input.completed;
    let habit_id  = input.habit_id;

    // The insert and the habit lookup run back to back on the connection
    // thread, but without a transaction. A failed lookup only leaves the
    // habit fields empty.
    let (id, habit) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (date, completed, notes, habit_id) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![date_str, completed, notes, habit_id],
        )?;
        let id = conn.last_insert_rowid();

        let habit = conn
          .query_row(
            "SELECT id, name, description, target_frequency FROM habits WHERE id = ?1",
            rusqlite::params![habit_id],
            RawHabit::from_row,
          )
          .inspect_err(|e| tracing::debug!(habit_id, error = %e, "habit lookup after record insert failed"))
          .ok();

        Ok((id, habit))
      })
      .await?;

    let record = Record {
      id,
      date,
      completed,
      notes: input.notes,
      habit_id,
      habit_name: String::new(),
      habit_description: String::new(),
      habit_target: String::new(),
    };

    Ok(match habit {
      Some(raw) => record.with_habit(&raw.into_habit()),
      None => record,
    })
  }

  async fn update_record(&self, id: i64, input: NewRecord) -> Result<u64> {
    let date_str = encode_date(parse_date(&input.date)?);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE records SET date = ?1, completed = ?2, notes = ?3, habit_id = ?4
           WHERE id = ?5",
          rusqlite::params![date_str, input.completed, input.notes, input.habit_id, id],
        )?)
      })
      .await?;

    Ok(changed as u64)
  }

  async fn delete_record(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM records WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
