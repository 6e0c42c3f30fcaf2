//! Handlers for `/topics` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/topics` | Most voted first |
//! | `POST`   | `/topics` | Body: `{"title":"..."}`; returns 201 |
//! | `GET`    | `/topics/:title` | Case-insensitive; 404 if not found |
//! | `PUT`    | `/topics/:title` | Body: `{"title"?, "votes"?}` |
//! | `DELETE` | `/topics/:title` | Also removes every subtopic |
//! | `PATCH`  | `/topics/:title/vote` | One more vote |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use agora_core::{store::TopicStore, title::Update, topic::Topic};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /topics`
pub async fn list<S: TopicStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Topic>>, ApiError> {
  Ok(Json(state.topics.list().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /topics/:title`
pub async fn get_one<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path(title): Path<String>,
) -> Result<Json<Topic>, ApiError> {
  Ok(Json(state.topics.get(&title).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /topics` and `POST /topics/:title/subtopics`.
///
/// `title` is optional at the JSON level so a missing title is reported as a
/// 400 by the service instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBody {
  pub title: Option<String>,
}

/// `POST /topics` — returns 201 + the stored [`Topic`].
pub async fn create<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let topic = state
    .topics
    .create(body.title.as_deref().unwrap_or_default())
    .await?;
  tracing::debug!(id = topic.id, title = %topic.title, "topic created");
  Ok((StatusCode::CREATED, Json(topic)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /topics/:title` — body: `{"title":"...","votes":3}`, both optional
/// but at least one required.
pub async fn update<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path(title): Path<String>,
  Json(body): Json<Update>,
) -> Result<Json<Topic>, ApiError> {
  let topic = state.topics.update(&title, body).await?;
  tracing::debug!(id = topic.id, title = %topic.title, "topic updated");
  Ok(Json(topic))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: String,
  pub topic:   Topic,
}

/// `DELETE /topics/:title` — returns the removed topic.
pub async fn delete_one<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path(title): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
  let topic = state.topics.delete(&title).await?;
  tracing::debug!(id = topic.id, title = %topic.title, "topic deleted");
  Ok(Json(Deleted {
    message: format!("topic {:?} deleted", topic.title),
    topic,
  }))
}

// ─── Vote ─────────────────────────────────────────────────────────────────────

/// `PATCH /topics/:title/vote`
pub async fn vote<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path(title): Path<String>,
) -> Result<Json<Topic>, ApiError> {
  Ok(Json(state.topics.vote(&title).await?))
}
