//! Demo data loaded into an empty store when `seed = true`.

use std::sync::Arc;

use agora_core::{
  Result,
  service::{SubtopicService, TopicService},
  store::TopicStore,
  title::Update,
};

/// Topics with their subtopics and starting votes.
pub const DEMO: &[(&str, &[(&str, i64)])] = &[
  ("bartending", &[("tragos", 30), ("herramientas", 20), ("técnicas", 10)]),
  ("videojuegos", &[("consolas", 30), ("pc gaming", 40), ("retro", 30)]),
  ("cocina", &[("recetas", 50), ("utensilios", 25), ("técnicas de corte", 15)]),
];

/// Load [`DEMO`] through the services so titles and links are derived the
/// same way as for API writes. Does nothing if any topic already exists.
///
/// Returns whether anything was written.
pub async fn seed<S: TopicStore>(store: Arc<S>) -> Result<bool> {
  let topics = TopicService::new(Arc::clone(&store));
  let subtopics = SubtopicService::new(store);

  if !topics.list().await?.is_empty() {
    return Ok(false);
  }

  for (topic, entries) in DEMO {
    let topic = topics.create(topic).await?;
    for (title, votes) in *entries {
      let created = subtopics.create(&topic.title, title).await?;
      subtopics
        .update(&topic.title, created.id, Update::votes(*votes))
        .await?;
    }
  }

  tracing::info!(topics = DEMO.len(), "seeded demo data");
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;

  use agora_store_memory::MemoryStore;

  #[tokio::test]
  async fn seeds_empty_store_once() {
    let store = Arc::new(MemoryStore::new());
    assert!(seed(Arc::clone(&store)).await.unwrap());
    assert!(!seed(Arc::clone(&store)).await.unwrap());

    let topics = TopicService::new(Arc::clone(&store)).list().await.unwrap();
    let titles: Vec<_> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["bartending", "videojuegos", "cocina"]);
  }

  #[tokio::test]
  async fn seeded_subtopics_are_ordered_and_linked() {
    let store = Arc::new(MemoryStore::new());
    seed(Arc::clone(&store)).await.unwrap();
    let subtopics = SubtopicService::new(store);

    let games = subtopics.list("videojuegos").await.unwrap();
    let order: Vec<_> = games.iter().map(|s| (s.title.as_str(), s.votes)).collect();
    assert_eq!(order, [("pc gaming", 40), ("consolas", 30), ("retro", 30)]);

    let cuts = subtopics.get("cocina", "técnicas de corte").await.unwrap();
    assert_eq!(cuts.votes, 15);
    assert_eq!(cuts.link, "/topics/cocina/subtopics/view/t%C3%A9cnicas%20de%20corte");
  }

  #[tokio::test]
  async fn non_empty_store_is_left_alone() {
    let store = Arc::new(MemoryStore::new());
    TopicService::new(Arc::clone(&store)).create("mine").await.unwrap();

    assert!(!seed(Arc::clone(&store)).await.unwrap());
    let topics = TopicService::new(store).list().await.unwrap();
    assert_eq!(topics.len(), 1);
  }
}
