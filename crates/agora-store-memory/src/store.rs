//! [`MemoryStore`] — the in-memory implementation of [`TopicStore`].

use std::sync::Arc;

use agora_core::{
  store::TopicStore,
  subtopic::{NewSubtopic, Subtopic, SubtopicChanges, SubtopicId},
  topic::{Topic, TopicChanges, TopicId},
};
use tokio::sync::RwLock;

use crate::{Error, Result};

// ─── State ───────────────────────────────────────────────────────────────────

/// Both collections are kept in insertion order, which is also id order.
#[derive(Debug, Default)]
struct State {
  topics:           Vec<Topic>,
  subtopics:        Vec<Subtopic>,
  last_topic_id:    TopicId,
  last_subtopic_id: SubtopicId,
}

impl State {
  fn topic_mut(&mut self, id: TopicId) -> Option<&mut Topic> {
    self.topics.iter_mut().find(|t| t.id == id)
  }

  fn subtopic_mut(&mut self, topic_id: TopicId, id: SubtopicId) -> Option<&mut Subtopic> {
    self
      .subtopics
      .iter_mut()
      .find(|s| s.id == id && s.topic_id == topic_id)
  }
}

/// Most voted first; the sort is stable so ties keep insertion order.
fn by_votes_desc<T>(mut items: Vec<T>, votes: impl Fn(&T) -> i64) -> Vec<T> {
  items.sort_by(|a, b| votes(b).cmp(&votes(a)));
  items
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A topic store held entirely in memory.
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  state: Arc<RwLock<State>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

// ─── TopicStore impl ─────────────────────────────────────────────────────────

impl TopicStore for MemoryStore {
  type Error = Error;

  // ── Topics ────────────────────────────────────────────────────────────────

  async fn list_topics(&self) -> Result<Vec<Topic>> {
    let state = self.state.read().await;
    Ok(by_votes_desc(state.topics.clone(), |t| t.votes))
  }

  async fn find_topic(&self, title: String) -> Result<Option<Topic>> {
    let state = self.state.read().await;
    Ok(state.topics.iter().find(|t| t.title == title).cloned())
  }

  async fn insert_topic(&self, title: String) -> Result<Topic> {
    let mut state = self.state.write().await;
    state.last_topic_id += 1;
    let topic = Topic { id: state.last_topic_id, title, votes: 0 };
    state.topics.push(topic.clone());
    Ok(topic)
  }

  async fn update_topic(&self, id: TopicId, changes: TopicChanges) -> Result<Option<Topic>> {
    let mut state = self.state.write().await;
    let Some(topic) = state.topic_mut(id) else {
      return Ok(None);
    };
    if let Some(title) = changes.title {
      topic.title = title;
    }
    if let Some(votes) = changes.votes {
      topic.votes = votes;
    }
    Ok(Some(topic.clone()))
  }

  async fn delete_topic(&self, id: TopicId) -> Result<Option<Topic>> {
    let mut state = self.state.write().await;
    let Some(index) = state.topics.iter().position(|t| t.id == id) else {
      return Ok(None);
    };
    let topic = state.topics.remove(index);
    state.subtopics.retain(|s| s.topic_id != id);
    Ok(Some(topic))
  }

  async fn vote_topic(&self, id: TopicId) -> Result<Option<Topic>> {
    let mut state = self.state.write().await;
    Ok(state.topic_mut(id).map(|topic| {
      topic.votes = topic.votes.saturating_add(1);
      topic.clone()
    }))
  }

  // ── Subtopics ─────────────────────────────────────────────────────────────

  async fn list_subtopics(&self, topic_id: TopicId) -> Result<Vec<Subtopic>> {
    let state = self.state.read().await;
    let owned = state
      .subtopics
      .iter()
      .filter(|s| s.topic_id == topic_id)
      .cloned()
      .collect();
    Ok(by_votes_desc(owned, |s| s.votes))
  }

  async fn find_subtopic(&self, topic_id: TopicId, title: String) -> Result<Option<Subtopic>> {
    let state = self.state.read().await;
    Ok(
      state
        .subtopics
        .iter()
        .find(|s| s.topic_id == topic_id && s.title == title)
        .cloned(),
    )
  }

  async fn get_subtopic(&self, topic_id: TopicId, id: SubtopicId) -> Result<Option<Subtopic>> {
    let state = self.state.read().await;
    Ok(
      state
        .subtopics
        .iter()
        .find(|s| s.topic_id == topic_id && s.id == id)
        .cloned(),
    )
  }

  async fn insert_subtopic(&self, input: NewSubtopic) -> Result<Subtopic> {
    let mut state = self.state.write().await;
    if !state.topics.iter().any(|t| t.id == input.topic_id) {
      return Err(Error::MissingTopic(input.topic_id));
    }
    state.last_subtopic_id += 1;
    let subtopic = Subtopic {
      id:       state.last_subtopic_id,
      topic_id: input.topic_id,
      title:    input.title,
      votes:    0,
      link:     input.link,
    };
    state.subtopics.push(subtopic.clone());
    Ok(subtopic)
  }

  async fn update_subtopic(
    &self,
    topic_id: TopicId,
    id:       SubtopicId,
    changes:  SubtopicChanges,
  ) -> Result<Option<Subtopic>> {
    let mut state = self.state.write().await;
    let Some(subtopic) = state.subtopic_mut(topic_id, id) else {
      return Ok(None);
    };
    if let Some(title) = changes.title {
      subtopic.title = title;
    }
    if let Some(votes) = changes.votes {
      subtopic.votes = votes;
    }
    if let Some(link) = changes.link {
      subtopic.link = link;
    }
    Ok(Some(subtopic.clone()))
  }

  async fn delete_subtopic(&self, topic_id: TopicId, id: SubtopicId) -> Result<Option<Subtopic>> {
    let mut state = self.state.write().await;
    let position = state
      .subtopics
      .iter()
      .position(|s| s.topic_id == topic_id && s.id == id);
    Ok(position.map(|index| state.subtopics.remove(index)))
  }

  async fn vote_subtopic(&self, topic_id: TopicId, id: SubtopicId) -> Result<Option<Subtopic>> {
    let mut state = self.state.write().await;
    Ok(state.subtopic_mut(topic_id, id).map(|subtopic| {
      subtopic.votes = subtopic.votes.saturating_add(1);
      subtopic.clone()
    }))
  }
}
