//! Behavioural checks shared by every [`TopicStore`] backend.
//!
//! Each function drives the topic and subtopic services over a fresh store
//! and panics on the first violated expectation. Backend crates call them
//! from their own `#[tokio::test]`s.

use std::sync::Arc;

use agora_core::{
  Error,
  service::{SubtopicService, TopicService},
  store::TopicStore,
  subtopic::{NewSubtopic, SortOrder, SubtopicQuery},
  title::Update,
};

/// Both services sharing one store.
pub struct Services<S> {
  pub topics:    TopicService<S>,
  pub subtopics: SubtopicService<S>,
}

pub fn services<S: TopicStore>(store: S) -> Services<S> {
  let store = Arc::new(store);
  Services {
    topics:    TopicService::new(Arc::clone(&store)),
    subtopics: SubtopicService::new(store),
  }
}

macro_rules! assert_err {
  ($result:expr, $variant:path) => {
    match $result {
      Err($variant(_)) => {}
      other => panic!("expected {}, got {other:?}", stringify!($variant)),
    }
  };
}

// ─── Topics ──────────────────────────────────────────────────────────────────

pub async fn create_then_get_normalizes<S: TopicStore>(store: S) {
  let s = services(store);

  let created = s.topics.create("  Bartending ").await.unwrap();
  assert_eq!(created.title, "bartending");
  assert_eq!(created.votes, 0);

  let fetched = s.topics.get("BARTENDING").await.unwrap();
  assert_eq!(fetched, created);
}

pub async fn topic_titles_are_unique_ignoring_case<S: TopicStore>(store: S) {
  let s = services(store);

  s.topics.create("cocina").await.unwrap();
  assert_err!(s.topics.create("Cocina").await, Error::AlreadyExists);
  assert_eq!(s.topics.list().await.unwrap().len(), 1);
}

pub async fn blank_topic_title_is_invalid<S: TopicStore>(store: S) {
  let s = services(store);

  assert_err!(s.topics.create("").await, Error::InvalidInput);
  assert_err!(s.topics.create("   ").await, Error::InvalidInput);
  assert!(s.topics.list().await.unwrap().is_empty());
}

pub async fn missing_topic_is_not_found<S: TopicStore>(store: S) {
  let s = services(store);

  assert_err!(s.topics.get("nope").await, Error::NotFound);
  assert_err!(s.topics.update("nope", Update::votes(1)).await, Error::NotFound);
  assert_err!(s.topics.delete("nope").await, Error::NotFound);
  assert_err!(s.topics.vote("nope").await, Error::NotFound);
}

pub async fn topics_are_listed_by_votes<S: TopicStore>(store: S) {
  let s = services(store);

  for (title, votes) in [("a", 30), ("b", 10), ("c", 20), ("d", 20)] {
    s.topics.create(title).await.unwrap();
    s.topics.update(title, Update::votes(votes)).await.unwrap();
  }

  let listed: Vec<_> = s
    .topics
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|t| (t.title, t.votes))
    .collect();
  assert_eq!(
    listed,
    vec![
      ("a".to_owned(), 30),
      ("c".to_owned(), 20),
      ("d".to_owned(), 20),
      ("b".to_owned(), 10),
    ]
  );
}

pub async fn empty_topic_update_is_rejected<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("retro").await.unwrap();
  s.topics.update("retro", Update::votes(7)).await.unwrap();

  assert_err!(s.topics.update("retro", Update::default()).await, Error::InvalidInput);
  assert_err!(s.topics.update("retro", Update::title("  ")).await, Error::InvalidInput);

  let unchanged = s.topics.get("retro").await.unwrap();
  assert_eq!(unchanged.votes, 7);
}

pub async fn topic_update_applies_supplied_fields<S: TopicStore>(store: S) {
  let s = services(store);
  let original = s.topics.create("bartending").await.unwrap();

  let voted = s.topics.update("bartending", Update::votes(-3)).await.unwrap();
  assert_eq!(voted.votes, -3);
  assert_eq!(voted.title, "bartending");

  let renamed = s.topics.update("Bartending", Update::title("Mixología")).await.unwrap();
  assert_eq!(renamed.id, original.id);
  assert_eq!(renamed.title, "mixología");
  assert_eq!(renamed.votes, -3);

  assert_err!(s.topics.get("bartending").await, Error::NotFound);
  assert_eq!(s.topics.get("MIXOLOGÍA").await.unwrap(), renamed);
}

pub async fn topic_rename_cannot_take_another_title<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  s.topics.create("videojuegos").await.unwrap();

  assert_err!(
    s.topics.update("cocina", Update::title("VIDEOJUEGOS")).await,
    Error::AlreadyExists
  );

  // Renaming to its own title (any case) is fine.
  let same = s.topics.update("cocina", Update::title("Cocina")).await.unwrap();
  assert_eq!(same.title, "cocina");
}

pub async fn topic_rename_relinks_subtopics<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("bartending").await.unwrap();
  s.subtopics.create("bartending", "gin tonic").await.unwrap();

  s.topics.update("bartending", Update::title("mixology")).await.unwrap();

  let sub = s.subtopics.get("mixology", "gin tonic").await.unwrap();
  assert_eq!(sub.link, "/topics/mixology/subtopics/view/gin%20tonic");
}

pub async fn topic_vote_adds_one<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();

  assert_eq!(s.topics.vote("cocina").await.unwrap().votes, 1);
  assert_eq!(s.topics.vote("COCINA").await.unwrap().votes, 2);
  assert_eq!(s.topics.get("cocina").await.unwrap().votes, 2);
}

pub async fn delete_topic_cascades<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  s.topics.create("retro").await.unwrap();
  s.subtopics.create("cocina", "recetas").await.unwrap();
  s.subtopics.create("cocina", "utensilios").await.unwrap();
  let kept = s.subtopics.create("retro", "consolas").await.unwrap();

  let deleted = s.topics.delete("Cocina").await.unwrap();
  assert_eq!(deleted.title, "cocina");

  assert_err!(s.subtopics.list("cocina").await, Error::NotFound);
  assert_eq!(s.subtopics.list("retro").await.unwrap(), vec![kept]);

  // A topic recreated under the same title starts empty.
  s.topics.create("cocina").await.unwrap();
  assert!(s.subtopics.list("cocina").await.unwrap().is_empty());
}

// ─── Subtopics ───────────────────────────────────────────────────────────────

pub async fn subtopic_lifecycle<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("bartending").await.unwrap();

  let sub = s.subtopics.create("bartending", "gintonic").await.unwrap();
  assert_eq!(sub.title, "gintonic");
  assert_eq!(sub.votes, 0);
  assert_eq!(sub.link, "/topics/bartending/subtopics/view/gintonic");

  let voted = s.subtopics.vote("bartending", sub.id).await.unwrap();
  assert_eq!(voted.votes, 1);
  assert_eq!(s.subtopics.get("bartending", "GinTonic").await.unwrap().votes, 1);

  s.topics.delete("bartending").await.unwrap();
  assert_err!(s.subtopics.get("bartending", "gintonic").await, Error::NotFound);
}

pub async fn subtopic_votes_accumulate<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("retro").await.unwrap();
  let sub = s.subtopics.create("retro", "arcade").await.unwrap();

  for _ in 0..3 {
    s.subtopics.vote("retro", sub.id).await.unwrap();
  }
  assert_eq!(s.subtopics.get("retro", "arcade").await.unwrap().votes, 3);
}

pub async fn votes_saturate<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("retro").await.unwrap();
  s.topics.update("retro", Update::votes(i64::MAX)).await.unwrap();
  let sub = s.subtopics.create("retro", "arcade").await.unwrap();
  s.subtopics.update("retro", sub.id, Update::votes(i64::MAX)).await.unwrap();

  assert_eq!(s.topics.vote("retro").await.unwrap().votes, i64::MAX);
  assert_eq!(s.subtopics.vote("retro", sub.id).await.unwrap().votes, i64::MAX);
}

pub async fn subtopic_titles_are_unique_per_topic<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  s.topics.create("bartending").await.unwrap();

  let a = s.subtopics.create("cocina", "Técnicas").await.unwrap();
  let b = s.subtopics.create("bartending", "técnicas").await.unwrap();
  assert_ne!(a.id, b.id);
  assert_eq!(a.link, "/topics/cocina/subtopics/view/t%C3%A9cnicas");

  assert_err!(s.subtopics.create("cocina", "TÉCNICAS").await, Error::AlreadyExists);
  assert_eq!(s.subtopics.list("cocina").await.unwrap().len(), 1);
}

pub async fn subtopic_needs_parent_and_title<S: TopicStore>(store: S) {
  let s = services(store);

  assert_err!(s.subtopics.create("nope", "anything").await, Error::NotFound);
  assert_err!(s.subtopics.list("nope").await, Error::NotFound);

  s.topics.create("cocina").await.unwrap();
  assert_err!(s.subtopics.create("cocina", " ").await, Error::InvalidInput);
  assert_err!(s.subtopics.get("cocina", "missing").await, Error::NotFound);
}

pub async fn subtopic_update_recomputes_link<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  let sub = s.subtopics.create("cocina", "recetas").await.unwrap();

  let updated = s
    .subtopics
    .update("COCINA", sub.id, Update { title: Some("Recetas Rápidas".into()), votes: Some(12) })
    .await
    .unwrap();
  assert_eq!(updated.id, sub.id);
  assert_eq!(updated.title, "recetas rápidas");
  assert_eq!(updated.votes, 12);
  assert_eq!(updated.link, "/topics/cocina/subtopics/view/recetas%20r%C3%A1pidas");

  let votes_only = s.subtopics.update("cocina", sub.id, Update::votes(4)).await.unwrap();
  assert_eq!(votes_only.link, updated.link);
  assert_eq!(votes_only.votes, 4);
}

pub async fn empty_subtopic_update_is_rejected<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  let sub = s.subtopics.create("cocina", "recetas").await.unwrap();

  assert_err!(s.subtopics.update("cocina", sub.id, Update::default()).await, Error::InvalidInput);
  assert_eq!(s.subtopics.get("cocina", "recetas").await.unwrap(), sub);
}

pub async fn subtopic_rename_cannot_take_sibling_title<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  let recetas = s.subtopics.create("cocina", "recetas").await.unwrap();
  s.subtopics.create("cocina", "utensilios").await.unwrap();

  assert_err!(
    s.subtopics.update("cocina", recetas.id, Update::title("Utensilios")).await,
    Error::AlreadyExists
  );
}

pub async fn subtopic_ids_are_scoped_to_their_topic<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  s.topics.create("retro").await.unwrap();
  let sub = s.subtopics.create("cocina", "recetas").await.unwrap();

  assert_err!(s.subtopics.update("retro", sub.id, Update::votes(1)).await, Error::NotFound);
  assert_err!(s.subtopics.vote("retro", sub.id).await, Error::NotFound);
  assert_err!(s.subtopics.delete("retro", sub.id).await, Error::NotFound);
  assert_err!(s.subtopics.delete("cocina", sub.id + 100).await, Error::NotFound);

  assert_eq!(s.subtopics.get("cocina", "recetas").await.unwrap(), sub);
}

pub async fn store_refuses_subtopic_without_topic<S: TopicStore>(store: S) {
  let orphan = NewSubtopic {
    topic_id: 42,
    title:    "orphan".into(),
    link:     "/topics/x/subtopics/view/orphan".into(),
  };
  assert!(store.insert_subtopic(orphan).await.is_err());
  assert!(store.list_subtopics(42).await.unwrap().is_empty());

  let topic = store.insert_topic("cocina".into()).await.unwrap();
  store.delete_topic(topic.id).await.unwrap();
  let late = NewSubtopic {
    topic_id: topic.id,
    title:    "recetas".into(),
    link:     "/topics/cocina/subtopics/view/recetas".into(),
  };
  assert!(store.insert_subtopic(late).await.is_err());
  assert!(store.list_subtopics(topic.id).await.unwrap().is_empty());
}

pub async fn subtopic_can_be_fetched_by_id<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  s.topics.create("retro").await.unwrap();
  let sub = s.subtopics.create("cocina", "recetas").await.unwrap();

  assert_eq!(s.subtopics.get_by_id("Cocina", sub.id).await.unwrap(), sub);
  assert_err!(s.subtopics.get_by_id("retro", sub.id).await, Error::NotFound);
  assert_err!(s.subtopics.get_by_id("nope", sub.id).await, Error::NotFound);
}

pub async fn delete_subtopic_removes_only_it<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("cocina").await.unwrap();
  let recetas = s.subtopics.create("cocina", "recetas").await.unwrap();
  let utensilios = s.subtopics.create("cocina", "utensilios").await.unwrap();

  let deleted = s.subtopics.delete("cocina", recetas.id).await.unwrap();
  assert_eq!(deleted, recetas);

  assert_eq!(s.subtopics.list("cocina").await.unwrap(), vec![utensilios]);
  assert_err!(s.subtopics.delete("cocina", recetas.id).await, Error::NotFound);
  assert!(s.topics.get("cocina").await.is_ok());
}

pub async fn subtopic_query_filters_and_orders<S: TopicStore>(store: S) {
  let s = services(store);
  s.topics.create("videojuegos").await.unwrap();
  for (title, votes) in [("consolas", 30), ("pc gaming", 40), ("retro", 30)] {
    let sub = s.subtopics.create("videojuegos", title).await.unwrap();
    s.subtopics.update("videojuegos", sub.id, Update::votes(votes)).await.unwrap();
  }

  let titles = |subs: Vec<agora_core::subtopic::Subtopic>| {
    subs.into_iter().map(|s| s.title).collect::<Vec<_>>()
  };

  let desc = s.subtopics.list("videojuegos").await.unwrap();
  assert_eq!(titles(desc), ["pc gaming", "consolas", "retro"]);

  let asc = s
    .subtopics
    .query("videojuegos", &SubtopicQuery { votes: None, order: SortOrder::Asc })
    .await
    .unwrap();
  assert_eq!(titles(asc), ["consolas", "retro", "pc gaming"]);

  let thirty = s
    .subtopics
    .query("videojuegos", &SubtopicQuery { votes: Some(30), order: SortOrder::Desc })
    .await
    .unwrap();
  assert_eq!(titles(thirty), ["consolas", "retro"]);
}

/// Expand to one `#[tokio::test]` per check, each given a fresh store built
/// by `$make` (evaluated inside the async test body, so it may `.await`).
#[macro_export]
macro_rules! backend_tests {
  (@each $make:expr; $($name:ident),* $(,)?) => {
    $(
      #[tokio::test]
      async fn $name() { $crate::$name($make).await }
    )*
  };
  ($make:expr) => {
    $crate::backend_tests!(@each $make;
      create_then_get_normalizes,
      topic_titles_are_unique_ignoring_case,
      blank_topic_title_is_invalid,
      missing_topic_is_not_found,
      topics_are_listed_by_votes,
      empty_topic_update_is_rejected,
      topic_update_applies_supplied_fields,
      topic_rename_cannot_take_another_title,
      topic_rename_relinks_subtopics,
      topic_vote_adds_one,
      delete_topic_cascades,
      subtopic_lifecycle,
      subtopic_votes_accumulate,
      votes_saturate,
      subtopic_titles_are_unique_per_topic,
      subtopic_needs_parent_and_title,
      subtopic_update_recomputes_link,
      empty_subtopic_update_is_rejected,
      subtopic_rename_cannot_take_sibling_title,
      subtopic_ids_are_scoped_to_their_topic,
      delete_subtopic_removes_only_it,
      subtopic_query_filters_and_orders,
      store_refuses_subtopic_without_topic,
      subtopic_can_be_fetched_by_id,
    );
  };
}
