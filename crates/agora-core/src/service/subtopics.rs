use std::sync::Arc;

use crate::{
  Error, Result,
  link::subtopic_link,
  store::TopicStore,
  subtopic::{NewSubtopic, SortOrder, Subtopic, SubtopicChanges, SubtopicId, SubtopicQuery},
  title::{Update, normalize_title},
  topic::Topic,
};

use super::require_topic;

/// CRUD and voting on subtopics, always scoped by the parent topic's title.
pub struct SubtopicService<S> {
  store: Arc<S>,
}

impl<S> Clone for SubtopicService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: TopicStore> SubtopicService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Subtopics of a topic, most voted first.
  pub async fn list(&self, topic_title: &str) -> Result<Vec<Subtopic>> {
    self.query(topic_title, &SubtopicQuery::default()).await
  }

  /// Subtopics of a topic, optionally filtered by exact vote count and
  /// ordered by votes in either direction. Ties keep insertion order.
  pub async fn query(
    &self,
    topic_title: &str,
    query: &SubtopicQuery,
  ) -> Result<Vec<Subtopic>> {
    let topic = self.topic(topic_title).await?;
    let mut subtopics = self
      .store
      .list_subtopics(topic.id)
      .await
      .map_err(Error::storage)?;

    if let Some(votes) = query.votes {
      subtopics.retain(|s| s.votes == votes);
    }
    if query.order == SortOrder::Asc {
      subtopics.sort_by_key(|s| s.votes);
    }

    Ok(subtopics)
  }

  /// Case-insensitive lookup by title within the parent topic.
  pub async fn get(&self, topic_title: &str, subtopic_title: &str) -> Result<Subtopic> {
    let topic = self.topic(topic_title).await?;
    let title = normalize_title(subtopic_title);
    self
      .store
      .find_subtopic(topic.id, title.clone())
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| {
        Error::NotFound(format!(
          "subtopic {title:?} does not exist in {:?}",
          topic.title
        ))
      })
  }

  /// Lookup by id within the parent topic.
  pub async fn get_by_id(&self, topic_title: &str, id: SubtopicId) -> Result<Subtopic> {
    let topic = self.topic(topic_title).await?;
    self.by_id(&topic, id).await
  }

  pub async fn create(&self, topic_title: &str, subtopic_title: &str) -> Result<Subtopic> {
    let topic = self.topic(topic_title).await?;

    let title = normalize_title(subtopic_title);
    if title.is_empty() {
      return Err(Error::InvalidInput("a subtopic needs a title".to_owned()));
    }
    self.ensure_free(&topic, &title).await?;

    let input = NewSubtopic {
      topic_id: topic.id,
      link:     subtopic_link(&topic.title, &title),
      title,
    };
    self.store.insert_subtopic(input).await.map_err(Error::storage)
  }

  /// Apply the supplied fields. A title change recomputes the link.
  pub async fn update(
    &self,
    topic_title: &str,
    id: SubtopicId,
    update: Update,
  ) -> Result<Subtopic> {
    let topic = self.topic(topic_title).await?;
    let subtopic = self.by_id(&topic, id).await?;

    let update = update.normalized();
    if update.is_empty() {
      return Err(Error::InvalidInput("no fields supplied to update".to_owned()));
    }

    let mut changes = SubtopicChanges { votes: update.votes, ..SubtopicChanges::default() };
    if let Some(new_title) = update.title {
      if new_title != subtopic.title {
        self.ensure_free(&topic, &new_title).await?;
      }
      changes.link = Some(subtopic_link(&topic.title, &new_title));
      changes.title = Some(new_title);
    }

    self
      .store
      .update_subtopic(topic.id, id, changes)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| subtopic_not_found(&topic, id))
  }

  pub async fn delete(&self, topic_title: &str, id: SubtopicId) -> Result<Subtopic> {
    let topic = self.topic(topic_title).await?;
    self
      .store
      .delete_subtopic(topic.id, id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| subtopic_not_found(&topic, id))
  }

  /// Add exactly one vote. Repeated calls keep adding.
  pub async fn vote(&self, topic_title: &str, id: SubtopicId) -> Result<Subtopic> {
    let topic = self.topic(topic_title).await?;
    self
      .store
      .vote_subtopic(topic.id, id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| subtopic_not_found(&topic, id))
  }

  async fn topic(&self, title: &str) -> Result<Topic> {
    require_topic(self.store.as_ref(), title).await
  }

  async fn by_id(&self, topic: &Topic, id: SubtopicId) -> Result<Subtopic> {
    self
      .store
      .get_subtopic(topic.id, id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| subtopic_not_found(topic, id))
  }

  async fn ensure_free(&self, topic: &Topic, title: &str) -> Result<()> {
    let existing = self
      .store
      .find_subtopic(topic.id, title.to_owned())
      .await
      .map_err(Error::storage)?;
    match existing {
      Some(_) => Err(Error::AlreadyExists(format!(
        "subtopic {title:?} already exists in {:?}",
        topic.title
      ))),
      None => Ok(()),
    }
  }
}

fn subtopic_not_found(topic: &Topic, id: SubtopicId) -> Error {
  Error::NotFound(format!(
    "subtopic with id {id} does not exist in {:?}",
    topic.title
  ))
}
