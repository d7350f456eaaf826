//! # To-do Routes
//!
//! The request handler handed to the server bootstrap. To-dos live in process
//! memory behind a [`RwLock`]; nothing is persisted across restarts.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | list every to-do |
//! | POST | `/add` | create from `{"item": "..."}` |
//! | GET | `/delete/{id}` | remove a to-do |
//! | GET | `/complete/{id}` | mark a to-do completed |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
  pub id: u64,
  pub item: String,
  pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewTodo {
  pub item: String,
}

#[derive(Debug, Default)]
struct TodoList {
  next_id: u64,
  items: Vec<Todo>,
}

/// Shared handle to the in-memory to-do list.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
  inner: Arc<RwLock<TodoList>>,
}

impl TodoStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn list(&self) -> Vec<Todo> {
    self.inner.read().await.items.clone()
  }

  pub async fn add(&self, item: String) -> Todo {
    let mut list = self.inner.write().await;
    list.next_id += 1;
    let todo = Todo {
      id: list.next_id,
      item,
      completed: false,
    };
    list.items.push(todo.clone());
    todo
  }

  /// Remove a to-do, returning it if it existed.
  pub async fn delete(&self, id: u64) -> Option<Todo> {
    let mut list = self.inner.write().await;
    let index = list.items.iter().position(|todo| todo.id == id)?;
    Some(list.items.remove(index))
  }

  /// Mark a to-do completed, returning its new state if it existed.
  pub async fn complete(&self, id: u64) -> Option<Todo> {
    let mut list = self.inner.write().await;
    let todo = list.items.iter_mut().find(|todo| todo.id == id)?;
    todo.completed = true;
    Some(todo.clone())
  }
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum RouteError {
  NotFound(u64),
  EmptyItem,
}

impl IntoResponse for RouteError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      RouteError::NotFound(id) => (StatusCode::NOT_FOUND, format!("to-do {id} not found")),
      RouteError::EmptyItem => (StatusCode::BAD_REQUEST, "item must not be empty".to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// The full to-do router with a fresh, empty store.
pub fn init() -> Router {
  router(TodoStore::new())
}

/// The to-do router over an existing store.
pub fn router(store: TodoStore) -> Router {
  Router::new()
    .route("/", get(list_todos))
    .route("/add", post(add_todo))
    .route("/delete/{id}", get(delete_todo))
    .route("/complete/{id}", get(complete_todo))
    .with_state(store)
}

async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<Todo>> {
  Json(store.list().await)
}

async fn add_todo(
  State(store): State<TodoStore>,
  Json(new): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), RouteError> {
  let item = new.item.trim();
  if item.is_empty() {
    return Err(RouteError::EmptyItem);
  }

  let todo = store.add(item.to_string()).await;
  debug!(id = todo.id, "Added to-do");
  Ok((StatusCode::CREATED, Json(todo)))
}

async fn delete_todo(State(store): State<TodoStore>, Path(id): Path<u64>) -> Result<Json<Todo>, RouteError> {
  let todo = store.delete(id).await.ok_or(RouteError::NotFound(id))?;
  debug!(id, "Deleted to-do");
  Ok(Json(todo))
}

async fn complete_todo(State(store): State<TodoStore>, Path(id): Path<u64>) -> Result<Json<Todo>, RouteError> {
  let todo = store.complete(id).await.ok_or(RouteError::NotFound(id))?;
  debug!(id, "Completed to-do");
  Ok(Json(todo))
}
