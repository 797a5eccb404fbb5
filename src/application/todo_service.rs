use crate::domain::message::ResultMessages;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

/// Unfinished todos allowed at any time; a create beyond this is rejected.
pub const MAX_UNFINISHED_COUNT: i64 = 5;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Business-rule violation carrying user-facing message text.
    #[error("{0}")]
    Business(ResultMessages),
    #[error(transparent)]
    System(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::Business(
            ResultMessages::error()
                .add(format!("[E004]The requested Todo is not found. (id={id})")),
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> ServiceResult<Vec<Todo>>;
    async fn create(&self, input: CreateTodo) -> ServiceResult<Todo>;
    async fn finish(&self, id: TodoId) -> ServiceResult<Todo>;
    async fn delete(&self, id: TodoId) -> ServiceResult<()>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    async fn find_existing(&self, id: TodoId) -> ServiceResult<Todo> {
        self.repo
            .find_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(id))
    }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self) -> ServiceResult<Vec<Todo>> {
        Ok(self.repo.find_all().await?)
    }

    async fn create(&self, input: CreateTodo) -> ServiceResult<Todo> {
        let unfinished = self.repo.count_unfinished().await?;
        if unfinished >= MAX_UNFINISHED_COUNT {
            return Err(ServiceError::Business(ResultMessages::error().add(format!(
                "[E001]The count of un-finished Todo must not be over {MAX_UNFINISHED_COUNT}."
            ))));
        }

        let todo = Todo {
            todo_id: TodoId(Uuid::new_v4()),
            todo_title: input.todo_title,
            finished: false,
            created_at: Utc::now(),
        };
        self.repo.create(&todo).await?;
        tracing::info!(id = %todo.todo_id, "todo created");
        Ok(todo)
    }

    async fn finish(&self, id: TodoId) -> ServiceResult<Todo> {
        let mut todo = self.find_existing(id).await?;
        if todo.finished {
            return Err(ServiceError::Business(ResultMessages::error().add(
                format!("[E002]The requested Todo is already finished. (id={id})"),
            )));
        }
        todo.finished = true;
        self.repo.update(&todo).await?;
        tracing::info!(id = %id, "todo finished");
        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> ServiceResult<()> {
        // Look the todo up first so a missing id yields the business error,
        // not a silent no-op.
        let todo = self.find_existing(id).await?;
        self.repo.delete(todo.todo_id).await?;
        tracing::info!(id = %id, "todo deleted");
        Ok(())
    }
}
