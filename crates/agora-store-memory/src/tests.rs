//! Service behaviour against [`MemoryStore`].

use agora_core::{store::TopicStore, subtopic::NewSubtopic};
use agora_test_suite as suite;

use crate::{Error, MemoryStore};

suite::backend_tests!(MemoryStore::new());

#[tokio::test]
async fn clones_share_state() {
  let store = MemoryStore::new();
  let s = suite::services(store.clone());
  s.topics.create("cocina").await.unwrap();

  let other = suite::services(store);
  assert_eq!(other.topics.get("cocina").await.unwrap().title, "cocina");
}

#[tokio::test]
async fn subtopic_requires_existing_topic() {
  let s = MemoryStore::new();
  let result = s
    .insert_subtopic(NewSubtopic {
      topic_id: 42,
      title:    "orphan".into(),
      link:     "/topics/x/subtopics/view/orphan".into(),
    })
    .await;
  assert!(matches!(result, Err(Error::MissingTopic(42))), "got {result:?}");
  assert!(s.list_subtopics(42).await.unwrap().is_empty());
}
