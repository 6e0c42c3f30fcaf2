//! Topic — the top-level named category.

use serde::{Deserialize, Serialize};

pub type TopicId = i64;

/// A top-level category with a vote count. Owns its subtopics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id:    TopicId,
  /// Normalized (trimmed, lowercase) and unique across all topics.
  pub title: String,
  pub votes: i64,
}

/// Store-level change set for [`crate::store::TopicStore::update_topic`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicChanges {
  pub title: Option<String>,
  pub votes: Option<i64>,
}
