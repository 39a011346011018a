//! Integration tests for `SqliteStore` against an in-memory database.

use std::path::PathBuf;

use chrono::NaiveDate;
use habits_core::{habit::NewHabit, record::NewRecord, store::HabitStore};

use crate::{DatabaseLocation, Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn reading() -> NewHabit {
  NewHabit::new("Leer", "30 min diarios").with_target_frequency("Diaria")
}

fn is_constraint_violation(err: &Error) -> bool {
  matches!(
    err,
    Error::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Connection strings ──────────────────────────────────────────────────────

#[test]
fn location_from_url_forms() {
  assert_eq!(DatabaseLocation::from_url(":memory:"), DatabaseLocation::Memory);
  assert_eq!(DatabaseLocation::from_url("sqlite::memory:"), DatabaseLocation::Memory);
  assert_eq!(
    DatabaseLocation::from_url("sqlite://data/habits.db"),
    DatabaseLocation::File(PathBuf::from("data/habits.db"))
  );
  assert_eq!(
    DatabaseLocation::from_url("sqlite:///var/lib/habits.db?mode=rwc"),
    DatabaseLocation::File(PathBuf::from("/var/lib/habits.db"))
  );
  assert_eq!(
    DatabaseLocation::from_url("habits.db"),
    DatabaseLocation::File(PathBuf::from("habits.db"))
  );
}

#[tokio::test]
async fn connect_in_memory_initialises_schema() {
  let s = SqliteStore::connect("sqlite::memory:").await.unwrap();
  assert!(s.list_habits().await.unwrap().is_empty());
  assert!(s.list_records().await.unwrap().is_empty());
}

// ─── Habits ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_habit_assigns_id() {
  let s = store().await;

  let habit = s.create_habit(reading()).await.unwrap();
  assert_eq!(habit.id, 1);
  assert_eq!(habit.name, "Leer");
  assert_eq!(habit.description, "30 min diarios");
  assert_eq!(habit.target_frequency, "Diaria");
}

#[tokio::test]
async fn list_habits_newest_first() {
  let s = store().await;
  let first  = s.create_habit(reading()).await.unwrap();
  let second = s.create_habit(NewHabit::new("Correr", "5 km")).await.unwrap();
  assert!(second.id > first.id);

  let all = s.list_habits().await.unwrap();
  let ids: Vec<i64> = all.iter().map(|h| h.id).collect();
  assert_eq!(ids, vec![second.id, first.id]);
  assert_eq!(all[0].target_frequency, "");
}

#[tokio::test]
async fn update_habit_overwrites_all_fields() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();

  let changed = s
    .update_habit(habit.id, NewHabit::new("Leer más", "1 hora"))
    .await
    .unwrap();
  assert_eq!(changed, 1);

  let all = s.list_habits().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, "Leer más");
  assert_eq!(all[0].description, "1 hora");
  assert_eq!(all[0].target_frequency, "");
}

#[tokio::test]
async fn update_missing_habit_changes_nothing() {
  let s = store().await;
  let changed = s.update_habit(99, reading()).await.unwrap();
  assert_eq!(changed, 0);
  assert!(s.list_habits().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_habit_reports_whether_row_existed() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();

  assert!(s.delete_habit(habit.id).await.unwrap());
  assert!(!s.delete_habit(habit.id).await.unwrap());
  assert!(s.list_habits().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
  let s = store().await;
  let first = s.create_habit(reading()).await.unwrap();
  s.delete_habit(first.id).await.unwrap();

  let second = s.create_habit(reading()).await.unwrap();
  assert!(second.id > first.id);
}

#[tokio::test]
async fn delete_habit_with_records_fails() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();
  s.create_record(NewRecord::new(habit.id, "2024-01-01")).await.unwrap();

  let err = s.delete_habit(habit.id).await.unwrap_err();
  assert!(is_constraint_violation(&err), "unexpected error: {err}");
  assert_eq!(s.list_habits().await.unwrap().len(), 1);
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_record_fills_habit_fields() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();

  let record = s
    .create_record(
      NewRecord::new(habit.id, "2024-01-01")
        .completed(true)
        .with_notes("Me sentí con mucha energía hoy"),
    )
    .await
    .unwrap();

  assert_eq!(record.id, 1);
  assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
  assert!(record.completed);
  assert_eq!(record.notes, "Me sentí con mucha energía hoy");
  assert_eq!(record.habit_id, habit.id);
  assert_eq!(record.habit_name, "Leer");
  assert_eq!(record.habit_description, "30 min diarios");
  assert_eq!(record.habit_target, "Diaria");
}

#[tokio::test]
async fn create_record_for_missing_habit_violates_foreign_key() {
  let s = store().await;

  let err = s
    .create_record(NewRecord::new(42, "2024-01-01"))
    .await
    .unwrap_err();
  assert!(is_constraint_violation(&err), "unexpected error: {err}");
  assert!(err.to_string().contains("FOREIGN KEY"), "message: {err}");
  assert!(s.list_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_record_with_bad_date_is_rejected() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();

  let err = s
    .create_record(NewRecord::new(habit.id, "not-a-date"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDate(ref d) if d == "not-a-date"));
  assert!(s.list_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_record_normalises_timestamp_dates() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();

  s.create_record(NewRecord::new(habit.id, "2024-03-05T10:00:00Z"))
    .await
    .unwrap();

  let records = s.list_records().await.unwrap();
  assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
}

#[tokio::test]
async fn list_records_newest_first_with_join() {
  let s = store().await;
  let reading = s.create_habit(reading()).await.unwrap();
  let running = s.create_habit(NewHabit::new("Correr", "5 km")).await.unwrap();

  let r1 = s.create_record(NewRecord::new(reading.id, "2024-01-01")).await.unwrap();
  let r2 = s.create_record(NewRecord::new(running.id, "2024-01-02")).await.unwrap();

  let records = s.list_records().await.unwrap();
  let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![r2.id, r1.id]);

  assert_eq!(records[0].habit_name, "Correr");
  assert_eq!(records[0].habit_target, "");
  assert_eq!(records[1].habit_name, "Leer");
  assert!(!records[1].completed);
  assert_eq!(records[1].notes, "");
}

#[tokio::test]
async fn update_record_overwrites_all_fields() {
  let s = store().await;
  let reading = s.create_habit(reading()).await.unwrap();
  let running = s.create_habit(NewHabit::new("Correr", "5 km")).await.unwrap();
  let record = s.create_record(NewRecord::new(reading.id, "2024-01-01")).await.unwrap();

  let changed = s
    .update_record(
      record.id,
      NewRecord::new(running.id, "2024-02-02").completed(true).with_notes("bien"),
    )
    .await
    .unwrap();
  assert_eq!(changed, 1);

  let records = s.list_records().await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
  assert!(records[0].completed);
  assert_eq!(records[0].notes, "bien");
  assert_eq!(records[0].habit_id, running.id);
  assert_eq!(records[0].habit_name, "Correr");
}

#[tokio::test]
async fn update_missing_record_changes_nothing() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();

  let changed = s
    .update_record(5, NewRecord::new(habit.id, "2024-01-01"))
    .await
    .unwrap();
  assert_eq!(changed, 0);
}

#[tokio::test]
async fn update_record_to_missing_habit_violates_foreign_key() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();
  let record = s.create_record(NewRecord::new(habit.id, "2024-01-01")).await.unwrap();

  let err = s
    .update_record(record.id, NewRecord::new(0, "2024-01-01"))
    .await
    .unwrap_err();
  assert!(is_constraint_violation(&err), "unexpected error: {err}");
}

#[tokio::test]
async fn delete_record_then_habit() {
  let s = store().await;
  let habit = s.create_habit(reading()).await.unwrap();
  let record = s.create_record(NewRecord::new(habit.id, "2024-01-01")).await.unwrap();

  assert!(s.delete_record(record.id).await.unwrap());
  assert!(!s.delete_record(record.id).await.unwrap());
  assert!(s.list_records().await.unwrap().is_empty());

  // Nothing references the habit any more.
  assert!(s.delete_habit(habit.id).await.unwrap());
}

// ─── Orphaned records ────────────────────────────────────────────────────────

#[tokio::test]
async fn list_records_tolerates_missing_habit() {
  let s = store().await;
  s.execute_batch(
    "PRAGMA foreign_keys = OFF;
     INSERT INTO records (date, completed, notes, habit_id)
     VALUES ('2024-01-01', 1, 'sin hábito', 42);",
  )
  .await
  .unwrap();

  let records = s.list_records().await.unwrap();
  assert_eq!(records.len(), 1);
  let record = &records[0];
  assert_eq!(record.habit_id, 42);
  assert!(record.completed);
  assert_eq!(record.notes, "sin hábito");
  assert_eq!(record.habit_name, "");
  assert_eq!(record.habit_description, "");
  assert_eq!(record.habit_target, "");

  let json = serde_json::to_value(record).unwrap();
  let obj = json.as_object().unwrap();
  assert_eq!(obj["habito_id"], 42);
  assert!(!obj.contains_key("habito_nombre"));
  assert!(!obj.contains_key("habito_descripcion"));
  assert!(!obj.contains_key("habito_meta"));
}

#[tokio::test]
async fn create_record_ignores_failed_habit_lookup() {
  let s = store().await;
  s.execute_batch("PRAGMA foreign_keys = OFF;").await.unwrap();

  let record = s
    .create_record(NewRecord::new(42, "2024-01-01").with_notes("huérfano"))
    .await
    .unwrap();
  assert!(record.id > 0);
  assert_eq!(record.habit_id, 42);
  assert_eq!(record.notes, "huérfano");
  assert!(record.habit_name.is_empty());
  assert!(record.habit_description.is_empty());
  assert!(record.habit_target.is_empty());
}
