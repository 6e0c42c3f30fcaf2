//! Topic and subtopic services.
//!
//! Services own validation (normalization, required fields, case-insensitive
//! uniqueness) and link derivation. They are generic over any
//! [`TopicStore`](crate::store::TopicStore) and share it through an `Arc`.

mod subtopics;
mod topics;

pub use subtopics::SubtopicService;
pub use topics::TopicService;

use crate::{Error, Result, store::TopicStore, title::normalize_title, topic::Topic};

/// Resolve a topic by a raw (un-normalized) title.
async fn require_topic<S: TopicStore>(store: &S, title: &str) -> Result<Topic> {
  let title = normalize_title(title);
  store
    .find_topic(title.clone())
    .await
    .map_err(Error::storage)?
    .ok_or_else(|| topic_not_found(&title))
}

fn topic_not_found(title: &str) -> Error {
  Error::NotFound(format!("topic {title:?} does not exist"))
}
