use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{extract::State, routing::{get, post}, Form, Router};
use serde::Deserialize;

use crate::application::todo_service::{ServiceError, TodoService};
use crate::domain::message::ResultMessages;
use crate::domain::todo::{CreateTodo, TodoId};
use crate::http::{flash::FlashStore, views};

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
    pub flash: FlashStore,
}

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/todo/list", get(list::<S>))
        .route("/todo/create", post(create::<S>))
        .route("/todo/finish", post(finish::<S>))
        .route("/todo/delete", post(delete::<S>))
        .with_state(state)
}

#[derive(Deserialize)]
struct CreateForm {
    #[serde(rename = "todoTitle")]
    todo_title: String,
}

/// Form payload for finish/delete. The title rides along with the id in the
/// original pages, so it is bound here too (used for logging only).
#[derive(Deserialize)]
struct TargetForm {
    #[serde(rename = "todoId")]
    todo_id: String,
    #[serde(rename = "todoTitle", default)]
    todo_title: Option<String>,
}

async fn index() -> Response {
    found("/todo/list")
}

async fn list<S: TodoService>(State(state): State<AppState<S>>) -> Response {
    let messages = state.flash.take();
    match state.service.list().await {
        Ok(todos) => Html(views::todo_list(&todos, messages.as_ref())).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn create<S: TodoService>(
    State(state): State<AppState<S>>,
    Form(form): Form<CreateForm>,
) -> Response {
    let todo_title = form.todo_title.trim().to_string();
    if todo_title.is_empty() || todo_title.chars().count() > 30 {
        let messages = ResultMessages::error()
            .add("The todo title must be between 1 and 30 characters.");
        return render_list(&state, Some(messages)).await;
    }

    match state.service.create(CreateTodo { todo_title }).await {
        Ok(_) => redirect_with_flash(&state, ResultMessages::success().add("Created successfully!")),
        Err(err) => on_error(&state, err).await,
    }
}

async fn finish<S: TodoService>(
    State(state): State<AppState<S>>,
    Form(form): Form<TargetForm>,
) -> Response {
    tracing::debug!(id = %form.todo_id, title = ?form.todo_title, "finish requested");
    let result = match parse_id(&form.todo_id) {
        Ok(id) => state.service.finish(id).await.map(|_| ()),
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => redirect_with_flash(&state, ResultMessages::success().add("Finished successfully!")),
        Err(err) => on_error(&state, err).await,
    }
}

async fn delete<S: TodoService>(
    State(state): State<AppState<S>>,
    Form(form): Form<TargetForm>,
) -> Response {
    tracing::debug!(id = %form.todo_id, title = ?form.todo_title, "delete requested");
    let result = match parse_id(&form.todo_id) {
        Ok(id) => state.service.delete(id).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => redirect_with_flash(&state, ResultMessages::success().add("Deleted successfully!")),
        Err(err) => on_error(&state, err).await,
    }
}

/// Business errors re-render the list page (no redirect) with the messages in
/// the page data; anything else is a plain 500.
async fn on_error<S: TodoService>(state: &AppState<S>, err: ServiceError) -> Response {
    match err {
        ServiceError::Business(messages) => render_list(state, Some(messages)).await,
        ServiceError::System(err) => internal_error(err),
    }
}

async fn render_list<S: TodoService>(
    state: &AppState<S>,
    messages: Option<ResultMessages>,
) -> Response {
    match state.service.list().await {
        Ok(todos) => Html(views::todo_list(&todos, messages.as_ref())).into_response(),
        Err(err) => internal_error(err),
    }
}

fn redirect_with_flash<S: TodoService>(state: &AppState<S>, messages: ResultMessages) -> Response {
    state.flash.set(messages);
    found("/todo/list")
}

fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

// An unparseable id cannot match any stored todo; surface it the same way.
fn parse_id(s: &str) -> Result<TodoId, ServiceError> {
    uuid::Uuid::parse_str(s)
        .map(TodoId)
        .map_err(|_| ServiceError::not_found(s))
}

fn internal_error<E: std::fmt::Display>(err: E) -> Response {
    tracing::warn!(%err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{err}")).into_response()
}
