//! Row mapping and statement helpers shared by the store methods.

use agora_core::{subtopic::Subtopic, topic::Topic};
use rusqlite::{Connection, Row, types::Value};

pub const TOPIC_COLUMNS: &str = "id, title, votes";

pub const SUBTOPIC_COLUMNS: &str = "id, topic_id, title, votes, link";

/// `votes + 1`, saturating at `i64::MAX` instead of overflowing to REAL.
pub const VOTE_INCREMENT: &str =
  "votes = CASE WHEN votes < 9223372036854775807 THEN votes + 1 ELSE votes END";

/// Map a row selected with [`TOPIC_COLUMNS`].
pub fn topic(row: &Row<'_>) -> rusqlite::Result<Topic> {
  Ok(Topic {
    id:    row.get(0)?,
    title: row.get(1)?,
    votes: row.get(2)?,
  })
}

/// Map a row selected with [`SUBTOPIC_COLUMNS`].
pub fn subtopic(row: &Row<'_>) -> rusqlite::Result<Subtopic> {
  Ok(Subtopic {
    id:       row.get(0)?,
    topic_id: row.get(1)?,
    title:    row.get(2)?,
    votes:    row.get(3)?,
    link:     row.get(4)?,
  })
}

/// The `SET` list of a dynamically built `UPDATE`: only the columns that
/// were actually supplied end up in the statement.
#[derive(Debug, Default)]
pub struct Assignments {
  columns: Vec<&'static str>,
  values:  Vec<Value>,
}

impl Assignments {
  pub fn set(&mut self, column: &'static str, value: impl Into<Value>) {
    self.columns.push(column);
    self.values.push(value.into());
  }

  pub fn is_empty(&self) -> bool { self.columns.is_empty() }

  /// Run `UPDATE {table} SET ... WHERE {filter}`. `filter` uses anonymous
  /// `?` placeholders bound, in order, to `filter_values`.
  pub fn execute(
    self,
    conn: &Connection,
    table: &str,
    filter: &str,
    filter_values: impl IntoIterator<Item = Value>,
  ) -> rusqlite::Result<usize> {
    let sets = self
      .columns
      .iter()
      .map(|c| format!("{c} = ?"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!("UPDATE {table} SET {sets} WHERE {filter}");

    let params = self.values.into_iter().chain(filter_values);
    conn.execute(&sql, rusqlite::params_from_iter(params))
  }
}
