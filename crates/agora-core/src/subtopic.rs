//! Subtopic — a child entity owned by exactly one topic.

use serde::{Deserialize, Serialize};

use crate::topic::TopicId;

/// Subtopic ids come from one sequence shared by all topics, but every
/// lookup is still scoped by the owning topic.
pub type SubtopicId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtopic {
  pub id:       SubtopicId,
  pub topic_id: TopicId,
  /// Normalized; unique within the owning topic only.
  pub title:    String,
  pub votes:    i64,
  /// Derived from the current topic and subtopic titles, see
  /// [`crate::link::subtopic_link`].
  pub link:     String,
}

/// Input to [`crate::store::TopicStore::insert_subtopic`].
/// `votes` always starts at zero and the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubtopic {
  pub topic_id: TopicId,
  pub title:    String,
  pub link:     String,
}

/// Store-level change set for [`crate::store::TopicStore::update_subtopic`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtopicChanges {
  pub title: Option<String>,
  pub votes: Option<i64>,
  pub link:  Option<String>,
}

/// Vote ordering for subtopic listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

/// Filters for [`crate::service::SubtopicService::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubtopicQuery {
  /// Keep only subtopics with exactly this many votes.
  pub votes: Option<i64>,
  #[serde(default)]
  pub order: SortOrder,
}
