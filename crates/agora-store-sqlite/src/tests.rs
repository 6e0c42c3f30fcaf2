//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use agora_core::{
  store::TopicStore,
  subtopic::NewSubtopic,
  topic::TopicChanges,
};
use agora_test_suite as suite;

use crate::{Error, SqliteStore, schema::SCHEMA_VERSION};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

suite::backend_tests!(store().await);

// ─── Backend specifics ───────────────────────────────────────────────────────

#[tokio::test]
async fn cascade_is_enforced_by_foreign_key() {
  let s = store().await;
  let topic = s.insert_topic("cocina".into()).await.unwrap();
  s.insert_subtopic(NewSubtopic {
    topic_id: topic.id,
    title:    "recetas".into(),
    link:     "/topics/cocina/subtopics/view/recetas".into(),
  })
  .await
  .unwrap();

  let deleted = s.delete_topic(topic.id).await.unwrap();
  assert_eq!(deleted, Some(topic.clone()));
  assert!(s.list_subtopics(topic.id).await.unwrap().is_empty());
  assert_eq!(s.delete_topic(topic.id).await.unwrap(), None);
}

#[tokio::test]
async fn subtopic_requires_existing_topic() {
  let s = store().await;
  let result = s
    .insert_subtopic(NewSubtopic {
      topic_id: 42,
      title:    "orphan".into(),
      link:     "/topics/x/subtopics/view/orphan".into(),
    })
    .await;
  assert!(matches!(result, Err(Error::Database(_))), "got {result:?}");
}

#[tokio::test]
async fn empty_changes_return_current_row() {
  let s = store().await;
  let topic = s.insert_topic("retro".into()).await.unwrap();

  let same = s
    .update_topic(topic.id, TopicChanges::default())
    .await
    .unwrap();
  assert_eq!(same, Some(topic));
  assert_eq!(s.update_topic(999, TopicChanges::default()).await.unwrap(), None);
}

#[tokio::test]
async fn subtopic_ids_are_global() {
  let s = store().await;
  let a = s.insert_topic("a".into()).await.unwrap();
  let b = s.insert_topic("b".into()).await.unwrap();

  let mut ids = Vec::new();
  for topic in [&a, &b, &a] {
    let sub = s
      .insert_subtopic(NewSubtopic {
        topic_id: topic.id,
        title:    format!("sub-{}", ids.len()),
        link:     String::new(),
      })
      .await
      .unwrap();
    ids.push(sub.id);
  }
  assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn data_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agora.sqlite");

  {
    let s = suite::services(SqliteStore::open(&path).await.unwrap());
    s.topics.create("bartending").await.unwrap();
    s.subtopics.create("bartending", "gintonic").await.unwrap();
  }

  let s = suite::services(SqliteStore::open(&path).await.unwrap());
  let sub = s.subtopics.get("bartending", "gintonic").await.unwrap();
  assert_eq!(sub.link, "/topics/bartending/subtopics/view/gintonic");
}

#[tokio::test]
async fn newer_schema_is_refused() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agora.sqlite");

  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 99;").unwrap();
  }

  let result = SqliteStore::open(&path).await;
  assert!(
    matches!(
      result,
      Err(Error::SchemaVersion { found: 99, supported: SCHEMA_VERSION })
    ),
    "expected a schema version error"
  );
}

#[tokio::test]
async fn opening_stamps_current_schema_version() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agora.sqlite");
  drop(SqliteStore::open(&path).await.unwrap());

  let conn = rusqlite::Connection::open(&path).unwrap();
  let version: i64 = conn
    .query_row("PRAGMA user_version", [], |r| r.get(0))
    .unwrap();
  assert_eq!(version, SCHEMA_VERSION);
}
