//! Handlers for `/topics/:title/subtopics` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/topics/:title/subtopics` | Optional `?votes=<n>&order=asc\|desc` |
//! | `POST`   | `/topics/:title/subtopics` | Body: `{"title":"..."}`; returns 201 |
//! | `GET`    | `/topics/:title/subtopics/:subtopic` | Lookup by id or title |
//! | `GET`    | `/topics/:title/subtopics/view/:subtopic` | Target of `link` |
//! | `PUT`    | `/topics/:title/subtopics/:id` | Body: `{"title"?, "votes"?}` |
//! | `DELETE` | `/topics/:title/subtopics/:id` | |
//! | `PATCH`  | `/topics/:title/subtopics/:id/vote` | One more vote |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use agora_core::{
  Error,
  store::TopicStore,
  subtopic::{Subtopic, SubtopicId, SubtopicQuery},
  title::{Update, normalize_title},
};
use serde::Serialize;

use crate::{ApiState, error::ApiError, topics::CreateBody};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /topics/:title/subtopics[?votes=<n>][&order=asc|desc]`
pub async fn list<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path(topic): Path<String>,
  Query(query): Query<SubtopicQuery>,
) -> Result<Json<Vec<Subtopic>>, ApiError> {
  Ok(Json(state.subtopics.query(&topic, &query).await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /topics/:title/subtopics/:subtopic` — a numeric `:subtopic` is tried
/// as an id first, then as a title, so titles like `"2024"` stay reachable.
pub async fn get_one<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path((topic, subtopic)): Path<(String, String)>,
) -> Result<Json<Subtopic>, ApiError> {
  if let Ok(id) = subtopic.trim().parse::<SubtopicId>() {
    match state.subtopics.get_by_id(&topic, id).await {
      Err(Error::NotFound(_)) => {}
      found => return Ok(Json(found?)),
    }
  }
  Ok(Json(state.subtopics.get(&topic, &subtopic).await?))
}

/// What the viewing link resolves to.
#[derive(Debug, Serialize)]
pub struct SubtopicView {
  pub topic:    String,
  pub subtopic: String,
  pub votes:    i64,
  pub link:     String,
}

/// `GET /topics/:title/subtopics/view/:subtopic`
pub async fn view<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path((topic, subtopic)): Path<(String, String)>,
) -> Result<Json<SubtopicView>, ApiError> {
  let subtopic = state.subtopics.get(&topic, &subtopic).await?;
  Ok(Json(SubtopicView {
    topic:    normalize_title(&topic),
    subtopic: subtopic.title,
    votes:    subtopic.votes,
    link:     subtopic.link,
  }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /topics/:title/subtopics` — returns 201 + the stored [`Subtopic`]
/// including its `link`.
pub async fn create<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path(topic): Path<String>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let subtopic = state
    .subtopics
    .create(&topic, body.title.as_deref().unwrap_or_default())
    .await?;
  tracing::debug!(id = subtopic.id, link = %subtopic.link, "subtopic created");
  Ok((StatusCode::CREATED, Json(subtopic)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /topics/:title/subtopics/:id`
pub async fn update<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path((topic, id)): Path<(String, SubtopicId)>,
  Json(body): Json<Update>,
) -> Result<Json<Subtopic>, ApiError> {
  let subtopic = state.subtopics.update(&topic, id, body).await?;
  tracing::debug!(id, link = %subtopic.link, "subtopic updated");
  Ok(Json(subtopic))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message:  String,
  pub subtopic: Subtopic,
}

/// `DELETE /topics/:title/subtopics/:id`
pub async fn delete_one<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path((topic, id)): Path<(String, SubtopicId)>,
) -> Result<Json<Deleted>, ApiError> {
  let subtopic = state.subtopics.delete(&topic, id).await?;
  tracing::debug!(id, "subtopic deleted");
  Ok(Json(Deleted {
    message: format!("subtopic {id} deleted from {:?}", normalize_title(&topic)),
    subtopic,
  }))
}

// ─── Vote ─────────────────────────────────────────────────────────────────────

/// `PATCH /topics/:title/subtopics/:id/vote`
pub async fn vote<S: TopicStore>(
  State(state): State<ApiState<S>>,
  Path((topic, id)): Path<(String, SubtopicId)>,
) -> Result<Json<Subtopic>, ApiError> {
  Ok(Json(state.subtopics.vote(&topic, id).await?))
}
