use std::sync::Arc;

use crate::{
  Error, Result,
  link::subtopic_link,
  store::TopicStore,
  subtopic::SubtopicChanges,
  title::{Update, normalize_title},
  topic::{Topic, TopicChanges},
};

use super::{require_topic, topic_not_found};

/// CRUD and voting on topics.
pub struct TopicService<S> {
  store: Arc<S>,
}

impl<S> Clone for TopicService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: TopicStore> TopicService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All topics, most voted first; ties keep insertion order.
  pub async fn list(&self) -> Result<Vec<Topic>> {
    self.store.list_topics().await.map_err(Error::storage)
  }

  /// Case-insensitive lookup by title.
  pub async fn get(&self, title: &str) -> Result<Topic> {
    require_topic(self.store.as_ref(), title).await
  }

  pub async fn create(&self, title: &str) -> Result<Topic> {
    let title = normalize_title(title);
    if title.is_empty() {
      return Err(Error::InvalidInput("a topic needs a title".to_owned()));
    }
    self.ensure_free(&title).await?;

    self.store.insert_topic(title).await.map_err(Error::storage)
  }

  /// Apply the supplied fields. A rename also rewrites the links of every
  /// subtopic the topic owns.
  pub async fn update(&self, title: &str, update: Update) -> Result<Topic> {
    let topic = self.get(title).await?;

    let update = update.normalized();
    if update.is_empty() {
      return Err(Error::InvalidInput("no fields supplied to update".to_owned()));
    }

    let rename = update.title.filter(|t| *t != topic.title);
    if let Some(new_title) = &rename {
      self.ensure_free(new_title).await?;
    }

    let changes = TopicChanges { title: rename.clone(), votes: update.votes };
    let updated = self
      .store
      .update_topic(topic.id, changes)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| topic_not_found(&topic.title))?;

    if rename.is_some() {
      self.relink_subtopics(&updated).await?;
    }

    Ok(updated)
  }

  /// Remove the topic and, with it, all of its subtopics.
  pub async fn delete(&self, title: &str) -> Result<Topic> {
    let topic = self.get(title).await?;
    self
      .store
      .delete_topic(topic.id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| topic_not_found(&topic.title))
  }

  /// Add exactly one vote.
  pub async fn vote(&self, title: &str) -> Result<Topic> {
    let topic = self.get(title).await?;
    self
      .store
      .vote_topic(topic.id)
      .await
      .map_err(Error::storage)?
      .ok_or_else(|| topic_not_found(&topic.title))
  }

  async fn ensure_free(&self, title: &str) -> Result<()> {
    let existing = self
      .store
      .find_topic(title.to_owned())
      .await
      .map_err(Error::storage)?;
    match existing {
      Some(_) => Err(Error::AlreadyExists(format!("topic {title:?} already exists"))),
      None => Ok(()),
    }
  }

  async fn relink_subtopics(&self, topic: &Topic) -> Result<()> {
    let subtopics = self
      .store
      .list_subtopics(topic.id)
      .await
      .map_err(Error::storage)?;

    for subtopic in subtopics {
      let changes = SubtopicChanges {
        link: Some(subtopic_link(&topic.title, &subtopic.title)),
        ..SubtopicChanges::default()
      };
      self
        .store
        .update_subtopic(topic.id, subtopic.id, changes)
        .await
        .map_err(Error::storage)?;
    }
    Ok(())
  }
}
