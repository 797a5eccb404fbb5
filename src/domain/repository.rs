use async_trait::async_trait;
use super::todo::{Todo, TodoId};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, todo: &Todo) -> anyhow::Result<()>;
    async fn find_one(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Todo>>;
    async fn update(&self, todo: &Todo) -> anyhow::Result<()>;
    async fn delete(&self, id: TodoId) -> anyhow::Result<bool>;
    async fn count_unfinished(&self) -> anyhow::Result<i64>;
}
