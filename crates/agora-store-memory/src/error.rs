//! Error type for `agora-store-memory`.

use agora_core::topic::TopicId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A subtopic was inserted under a topic that does not exist.
  #[error("topic {0} does not exist")]
  MissingTopic(TopicId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
