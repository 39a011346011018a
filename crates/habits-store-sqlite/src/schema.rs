//! SQL schema for the habit tracker SQLite store.
//!
//! Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys` is a per-connection setting, so it lives here rather than in
/// the database file.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    name             TEXT NOT NULL,
    description      TEXT NOT NULL,
    target_frequency TEXT
);

CREATE TABLE IF NOT EXISTS records (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    date      TEXT NOT NULL,       -- YYYY-MM-DD
    completed INTEGER DEFAULT 0,
    notes     TEXT,
    habit_id  INTEGER REFERENCES habits(id)
);
";
