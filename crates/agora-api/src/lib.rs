//! JSON REST API for Agora.
//!
//! Exposes an axum [`Router`] backed by any [`agora_core::store::TopicStore`].
//! Transport concerns (listening, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = agora_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod subtopics;
pub mod topics;

use std::sync::Arc;

use agora_core::{
  service::{SubtopicService, TopicService},
  store::TopicStore,
};
use axum::{
  Router,
  routing::{get, patch},
};

pub use error::ApiError;

/// Shared state threaded through all handlers: both services over one store.
pub struct ApiState<S> {
  pub topics:    TopicService<S>,
  pub subtopics: SubtopicService<S>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      topics:    self.topics.clone(),
      subtopics: self.subtopics.clone(),
    }
  }
}

impl<S: TopicStore> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      topics:    TopicService::new(Arc::clone(&store)),
      subtopics: SubtopicService::new(store),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Subtopic links point at the `view` route, so
/// nesting under a prefix also prefixes where those links resolve.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TopicStore + 'static,
{
  Router::new()
    // Topics
    .route("/topics", get(topics::list::<S>).post(topics::create::<S>))
    .route(
      "/topics/{title}",
      get(topics::get_one::<S>)
        .put(topics::update::<S>)
        .delete(topics::delete_one::<S>),
    )
    .route("/topics/{title}/vote", patch(topics::vote::<S>))
    // Subtopics
    .route(
      "/topics/{title}/subtopics",
      get(subtopics::list::<S>).post(subtopics::create::<S>),
    )
    .route(
      "/topics/{title}/subtopics/{subtopic}",
      get(subtopics::get_one::<S>)
        .put(subtopics::update::<S>)
        .delete(subtopics::delete_one::<S>),
    )
    .route("/topics/{title}/subtopics/view/{subtopic}", get(subtopics::view::<S>))
    .route("/topics/{title}/subtopics/{subtopic}/vote", patch(subtopics::vote::<S>))
    .with_state(ApiState::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use agora_store_memory::MemoryStore;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn app() -> Router {
    api_router(Arc::new(MemoryStore::new()))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp   = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value  = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  // ── Topics ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_topic_returns_201_with_normalized_title() {
    let app = app();
    let (status, body) = send(&app, "POST", "/topics", Some(json!({ "title": "Bartending" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "bartending");
    assert_eq!(body["votes"], 0);
    assert!(body["id"].is_i64());

    let (status, body) = send(&app, "GET", "/topics/BARTENDING", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "bartending");
  }

  #[tokio::test]
  async fn create_topic_without_title_is_400() {
    let app = app();
    let (status, body) = send(&app, "POST", "/topics", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "POST", "/topics", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn duplicate_topic_is_400() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    let (status, body) = send(&app, "POST", "/topics", Some(json!({ "title": "Cocina" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
  }

  #[tokio::test]
  async fn unknown_topic_is_404() {
    let app = app();
    for (method, uri) in [
      ("GET", "/topics/nope"),
      ("DELETE", "/topics/nope"),
      ("PATCH", "/topics/nope/vote"),
      ("GET", "/topics/nope/subtopics"),
    ] {
      let (status, body) = send(&app, method, uri, None).await;
      assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
      assert!(body["error"].is_string());
    }
  }

  #[tokio::test]
  async fn topics_list_most_voted_first() {
    let app = app();
    for (title, votes) in [("a", 30), ("b", 10), ("c", 20)] {
      send(&app, "POST", "/topics", Some(json!({ "title": title }))).await;
      let (status, _) =
        send(&app, "PUT", &format!("/topics/{title}"), Some(json!({ "votes": votes }))).await;
      assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/topics", None).await;
    assert_eq!(status, StatusCode::OK);
    let votes: Vec<i64> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["votes"].as_i64().unwrap())
      .collect();
    assert_eq!(votes, vec![30, 20, 10]);
  }

  #[tokio::test]
  async fn update_topic_without_fields_is_400() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "retro" }))).await;
    let (status, _) = send(&app, "PUT", "/topics/retro", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/topics/missing", Some(json!({ "votes": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_topic_returns_record_and_cascades() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    send(&app, "POST", "/topics/cocina/subtopics", Some(json!({ "title": "recetas" }))).await;

    let (status, body) = send(&app, "DELETE", "/topics/cocina", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"]["title"], "cocina");
    assert!(body["message"].is_string());

    let (status, _) = send(&app, "GET", "/topics/cocina/subtopics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn vote_topic_adds_one() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    let (status, body) = send(&app, "PATCH", "/topics/cocina/vote", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"], 1);
  }

  // ── Subtopics ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn subtopic_scenario() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "bartending" }))).await;

    let (status, created) = send(
      &app,
      "POST",
      "/topics/bartending/subtopics",
      Some(json!({ "title": "GinTonic" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "gintonic");
    assert_eq!(created["votes"], 0);
    assert_eq!(created["link"], "/topics/bartending/subtopics/view/gintonic");
    assert!(created["topicId"].is_i64());
    let id = created["id"].as_i64().unwrap();

    let (status, voted) =
      send(&app, "PATCH", &format!("/topics/bartending/subtopics/{id}/vote"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(voted["votes"], 1);

    let (status, fetched) = send(&app, "GET", "/topics/bartending/subtopics/gintonic", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["votes"], 1);

    send(&app, "DELETE", "/topics/bartending", None).await;
    let (status, _) = send(&app, "GET", "/topics/bartending/subtopics/gintonic", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn get_subtopic_by_id_or_title() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    send(&app, "POST", "/topics", Some(json!({ "title": "retro" }))).await;
    let (_, created) =
      send(&app, "POST", "/topics/cocina/subtopics", Some(json!({ "title": "recetas" }))).await;
    let (_, year) =
      send(&app, "POST", "/topics/cocina/subtopics", Some(json!({ "title": "2024" }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, by_id) = send(&app, "GET", &format!("/topics/cocina/subtopics/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, created);

    let (status, by_title) = send(&app, "GET", "/topics/cocina/subtopics/2024", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_title, year);

    let (status, _) = send(&app, "GET", &format!("/topics/retro/subtopics/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn link_resolves_to_view() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    let (_, created) = send(
      &app,
      "POST",
      "/topics/cocina/subtopics",
      Some(json!({ "title": "Técnicas de corte" })),
    )
    .await;
    let link = created["link"].as_str().unwrap().to_owned();
    assert_eq!(link, "/topics/cocina/subtopics/view/t%C3%A9cnicas%20de%20corte");

    let (status, view) = send(&app, "GET", &link, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["topic"], "cocina");
    assert_eq!(view["subtopic"], "técnicas de corte");
    assert_eq!(view["link"], link);
  }

  #[tokio::test]
  async fn create_subtopic_errors() {
    let app = app();
    let (status, _) =
      send(&app, "POST", "/topics/nope/subtopics", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    let (status, _) = send(&app, "POST", "/topics/cocina/subtopics", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/topics/cocina/subtopics", Some(json!({ "title": "recetas" }))).await;
    let (status, _) =
      send(&app, "POST", "/topics/cocina/subtopics", Some(json!({ "title": "RECETAS" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn update_and_delete_subtopic() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    let (_, created) =
      send(&app, "POST", "/topics/cocina/subtopics", Some(json!({ "title": "recetas" }))).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/topics/cocina/subtopics/{id}");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) =
      send(&app, "PUT", &uri, Some(json!({ "title": "Aperitivos", "votes": 12 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "aperitivos");
    assert_eq!(updated["votes"], 12);
    assert_eq!(updated["link"], "/topics/cocina/subtopics/view/aperitivos");

    let (status, deleted) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["subtopic"]["id"], id);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn list_subtopics_accepts_filters() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "videojuegos" }))).await;
    for (title, votes) in [("consolas", 30), ("pc gaming", 40), ("retro", 30)] {
      let (_, created) = send(
        &app,
        "POST",
        "/topics/videojuegos/subtopics",
        Some(json!({ "title": title })),
      )
      .await;
      let id = created["id"].as_i64().unwrap();
      send(
        &app,
        "PUT",
        &format!("/topics/videojuegos/subtopics/{id}"),
        Some(json!({ "votes": votes })),
      )
      .await;
    }

    let titles = |body: Value| -> Vec<String> {
      body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_owned())
        .collect()
    };

    let (_, body) = send(&app, "GET", "/topics/videojuegos/subtopics", None).await;
    assert_eq!(titles(body), ["pc gaming", "consolas", "retro"]);

    let (_, body) = send(&app, "GET", "/topics/videojuegos/subtopics?order=asc", None).await;
    assert_eq!(titles(body), ["consolas", "retro", "pc gaming"]);

    let (_, body) = send(&app, "GET", "/topics/videojuegos/subtopics?votes=30", None).await;
    assert_eq!(titles(body), ["consolas", "retro"]);
  }

  #[tokio::test]
  async fn non_numeric_subtopic_id_is_rejected() {
    let app = app();
    send(&app, "POST", "/topics", Some(json!({ "title": "cocina" }))).await;
    let (status, _) = send(&app, "PATCH", "/topics/cocina/subtopics/abc/vote", None).await;
    assert!(status.is_client_error(), "got {status}");
  }
}
