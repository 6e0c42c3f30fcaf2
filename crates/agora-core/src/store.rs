//! The `TopicStore` trait.
//!
//! The trait is implemented by storage backends (`agora-store-memory`,
//! `agora-store-sqlite`). The services in [`crate::service`] depend on this
//! abstraction, never on a concrete backend.

use std::future::Future;

use crate::{
  subtopic::{NewSubtopic, Subtopic, SubtopicChanges, SubtopicId},
  topic::{Topic, TopicChanges, TopicId},
};

/// Abstraction over a topic/subtopic storage backend.
///
/// Backends do no validation: titles arrive normalized and uniqueness has
/// already been checked by the caller. Each method is atomic on its own.
///
/// Listings are ordered by `votes` descending, ties broken by ascending id
/// (insertion order).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TopicStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Topics ────────────────────────────────────────────────────────────

  fn list_topics(
    &self,
  ) -> impl Future<Output = Result<Vec<Topic>, Self::Error>> + Send + '_;

  /// Look up a topic by its normalized title.
  fn find_topic(
    &self,
    title: String,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + '_;

  /// Persist a new topic with zero votes.
  fn insert_topic(
    &self,
    title: String,
  ) -> impl Future<Output = Result<Topic, Self::Error>> + Send + '_;

  /// Apply the present fields of `changes`. Returns `None` if the topic does
  /// not exist.
  fn update_topic(
    &self,
    id: TopicId,
    changes: TopicChanges,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + '_;

  /// Remove a topic together with all of its subtopics. Returns the removed
  /// topic, or `None` if it did not exist.
  fn delete_topic(
    &self,
    id: TopicId,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + '_;

  /// Add one vote, saturating at `i64::MAX`.
  fn vote_topic(
    &self,
    id: TopicId,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + '_;

  // ── Subtopics ─────────────────────────────────────────────────────────

  fn list_subtopics(
    &self,
    topic_id: TopicId,
  ) -> impl Future<Output = Result<Vec<Subtopic>, Self::Error>> + Send + '_;

  /// Look up a subtopic of `topic_id` by its normalized title.
  fn find_subtopic(
    &self,
    topic_id: TopicId,
    title: String,
  ) -> impl Future<Output = Result<Option<Subtopic>, Self::Error>> + Send + '_;

  /// Look up a subtopic by id; ids owned by another topic are not found.
  fn get_subtopic(
    &self,
    topic_id: TopicId,
    id: SubtopicId,
  ) -> impl Future<Output = Result<Option<Subtopic>, Self::Error>> + Send + '_;

  /// Persist a new subtopic with zero votes.
  fn insert_subtopic(
    &self,
    input: NewSubtopic,
  ) -> impl Future<Output = Result<Subtopic, Self::Error>> + Send + '_;

  fn update_subtopic(
    &self,
    topic_id: TopicId,
    id: SubtopicId,
    changes: SubtopicChanges,
  ) -> impl Future<Output = Result<Option<Subtopic>, Self::Error>> + Send + '_;

  fn delete_subtopic(
    &self,
    topic_id: TopicId,
    id: SubtopicId,
  ) -> impl Future<Output = Result<Option<Subtopic>, Self::Error>> + Send + '_;

  /// Add one vote, saturating at `i64::MAX`.
  fn vote_subtopic(
    &self,
    topic_id: TopicId,
    id: SubtopicId,
  ) -> impl Future<Output = Result<Option<Subtopic>, Self::Error>> + Send + '_;
}
