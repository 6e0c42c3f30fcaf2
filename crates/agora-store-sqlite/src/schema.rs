//! SQL schema for the Agora SQLite store.
//!
//! Executed once at connection startup. The schema version is kept in
//! `PRAGMA user_version`, stamped from [`SCHEMA_VERSION`] after the DDL runs;
//! opening a file with a newer version is refused.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Titles are stored already normalized (trimmed, lowercase), so the UNIQUE
/// constraints enforce case-insensitive uniqueness.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS topics (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title  TEXT    NOT NULL UNIQUE,
    votes  INTEGER NOT NULL DEFAULT 0
);

-- Subtopic ids come from one sequence shared by all topics.
CREATE TABLE IF NOT EXISTS subtopics (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id  INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    title     TEXT    NOT NULL,
    votes     INTEGER NOT NULL DEFAULT 0,
    link      TEXT    NOT NULL,
    UNIQUE (topic_id, title)
);

CREATE INDEX IF NOT EXISTS subtopics_topic_idx ON subtopics(topic_id);
";
