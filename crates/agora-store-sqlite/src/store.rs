//! [`SqliteStore`] — the SQLite implementation of [`TopicStore`].

use std::path::Path;

use agora_core::{
  store::TopicStore,
  subtopic::{NewSubtopic, Subtopic, SubtopicChanges, SubtopicId},
  topic::{Topic, TopicChanges, TopicId},
};
use rusqlite::{OptionalExtension as _, types::Value};

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
  sql::{self, Assignments, SUBTOPIC_COLUMNS, TOPIC_COLUMNS, VOTE_INCREMENT},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A topic store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?))
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::SchemaVersion { found, supported: SCHEMA_VERSION });
    }

    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TopicStore impl ─────────────────────────────────────────────────────────

impl TopicStore for SqliteStore {
  type Error = Error;

  // ── Topics ────────────────────────────────────────────────────────────────

  async fn list_topics(&self) -> Result<Vec<Topic>> {
    let topics = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TOPIC_COLUMNS} FROM topics ORDER BY votes DESC, id ASC"
        ))?;
        let rows = stmt
          .query_map([], sql::topic)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(topics)
  }

  async fn find_topic(&self, title: String) -> Result<Option<Topic>> {
    let topic = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE title = ?1"),
              rusqlite::params![title],
              sql::topic,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(topic)
  }

  async fn insert_topic(&self, title: String) -> Result<Topic> {
    let topic = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO topics (title, votes) VALUES (?1, 0)",
          rusqlite::params![title],
        )?;
        Ok(Topic { id: conn.last_insert_rowid(), title, votes: 0 })
      })
      .await?;
    Ok(topic)
  }

  async fn update_topic(&self, id: TopicId, changes: TopicChanges) -> Result<Option<Topic>> {
    let mut sets = Assignments::default();
    if let Some(title) = changes.title {
      sets.set("title", title);
    }
    if let Some(votes) = changes.votes {
      sets.set("votes", votes);
    }

    let topic = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !sets.is_empty() {
          sets.execute(&tx, "topics", "id = ?", [Value::Integer(id)])?;
        }
        let topic = tx
          .query_row(
            &format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = ?1"),
            rusqlite::params![id],
            sql::topic,
          )
          .optional()?;
        tx.commit()?;
        Ok(topic)
      })
      .await?;
    Ok(topic)
  }

  async fn delete_topic(&self, id: TopicId) -> Result<Option<Topic>> {
    let topic = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let topic = tx
          .query_row(
            &format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = ?1"),
            rusqlite::params![id],
            sql::topic,
          )
          .optional()?;
        // Subtopics go with it through ON DELETE CASCADE.
        if topic.is_some() {
          tx.execute("DELETE FROM topics WHERE id = ?1", rusqlite::params![id])?;
        }
        tx.commit()?;
        Ok(topic)
      })
      .await?;
    Ok(topic)
  }

  async fn vote_topic(&self, id: TopicId) -> Result<Option<Topic>> {
    let topic = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          &format!("UPDATE topics SET {VOTE_INCREMENT} WHERE id = ?1"),
          rusqlite::params![id],
        )?;
        let topic = if changed == 0 {
          None
        } else {
          Some(tx.query_row(
            &format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = ?1"),
            rusqlite::params![id],
            sql::topic,
          )?)
        };
        tx.commit()?;
        Ok(topic)
      })
      .await?;
    Ok(topic)
  }

  // ── Subtopics ─────────────────────────────────────────────────────────────

  async fn list_subtopics(&self, topic_id: TopicId) -> Result<Vec<Subtopic>> {
    let subtopics = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBTOPIC_COLUMNS} FROM subtopics
           WHERE topic_id = ?1
           ORDER BY votes DESC, id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![topic_id], sql::subtopic)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(subtopics)
  }

  async fn find_subtopic(&self, topic_id: TopicId, title: String) -> Result<Option<Subtopic>> {
    let subtopic = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {SUBTOPIC_COLUMNS} FROM subtopics WHERE topic_id = ?1 AND title = ?2"
              ),
              rusqlite::params![topic_id, title],
              sql::subtopic,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(subtopic)
  }

  async fn get_subtopic(&self, topic_id: TopicId, id: SubtopicId) -> Result<Option<Subtopic>> {
    let subtopic = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {SUBTOPIC_COLUMNS} FROM subtopics WHERE id = ?1 AND topic_id = ?2"
              ),
              rusqlite::params![id, topic_id],
              sql::subtopic,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(subtopic)
  }

  async fn insert_subtopic(&self, input: NewSubtopic) -> Result<Subtopic> {
    let subtopic = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subtopics (topic_id, title, votes, link) VALUES (?1, ?2, 0, ?3)",
          rusqlite::params![input.topic_id, input.title, input.link],
        )?;
        Ok(Subtopic {
          id:       conn.last_insert_rowid(),
          topic_id: input.topic_id,
          title:    input.title,
          votes:    0,
          link:     input.link,
        })
      })
      .await?;
    Ok(subtopic)
  }

  async fn update_subtopic(
    &self,
    topic_id: TopicId,
    id:       SubtopicId,
    changes:  SubtopicChanges,
  ) -> Result<Option<Subtopic>> {
    let mut sets = Assignments::default();
    if let Some(title) = changes.title {
      sets.set("title", title);
    }
    if let Some(votes) = changes.votes {
      sets.set("votes", votes);
    }
    if let Some(link) = changes.link {
      sets.set("link", link);
    }

    let subtopic = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !sets.is_empty() {
          sets.execute(
            &tx,
            "subtopics",
            "id = ? AND topic_id = ?",
            [Value::Integer(id), Value::Integer(topic_id)],
          )?;
        }
        let subtopic = tx
          .query_row(
            &format!("SELECT {SUBTOPIC_COLUMNS} FROM subtopics WHERE id = ?1 AND topic_id = ?2"),
            rusqlite::params![id, topic_id],
            sql::subtopic,
          )
          .optional()?;
        tx.commit()?;
        Ok(subtopic)
      })
      .await?;
    Ok(subtopic)
  }

  async fn delete_subtopic(&self, topic_id: TopicId, id: SubtopicId) -> Result<Option<Subtopic>> {
    let subtopic = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let subtopic = tx
          .query_row(
            &format!("SELECT {SUBTOPIC_COLUMNS} FROM subtopics WHERE id = ?1 AND topic_id = ?2"),
            rusqlite::params![id, topic_id],
            sql::subtopic,
          )
          .optional()?;
        if subtopic.is_some() {
          tx.execute(
            "DELETE FROM subtopics WHERE id = ?1 AND topic_id = ?2",
            rusqlite::params![id, topic_id],
          )?;
        }
        tx.commit()?;
        Ok(subtopic)
      })
      .await?;
    Ok(subtopic)
  }

  async fn vote_subtopic(&self, topic_id: TopicId, id: SubtopicId) -> Result<Option<Subtopic>> {
    let subtopic = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          &format!("UPDATE subtopics SET {VOTE_INCREMENT} WHERE id = ?1 AND topic_id = ?2"),
          rusqlite::params![id, topic_id],
        )?;
        let subtopic = if changed == 0 {
          None
        } else {
          Some(tx.query_row(
            &format!("SELECT {SUBTOPIC_COLUMNS} FROM subtopics WHERE id = ?1 AND topic_id = ?2"),
            rusqlite::params![id, topic_id],
            sql::subtopic,
          )?)
        };
        tx.commit()?;
        Ok(subtopic)
      })
      .await?;
    Ok(subtopic)
  }
}
