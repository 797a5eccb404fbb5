use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo (
                todo_id TEXT PRIMARY KEY,
                todo_title TEXT NOT NULL,
                finished INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, todo: &Todo) -> Result<()> {
        sqlx::query(
            "INSERT INTO todo (todo_id, todo_title, finished, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(todo.todo_id.0.to_string())
        .bind(&todo.todo_title)
        .bind(todo.finished as i64)
        .bind(todo.created_at.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn find_one(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT todo_id, todo_title, finished, created_at FROM todo WHERE todo_id = ?1")
            .bind(id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(row_to_todo))
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT todo_id, todo_title, finished, created_at FROM todo ORDER BY created_at ASC")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_todo).collect())
    }

    async fn update(&self, todo: &Todo) -> Result<()> {
        sqlx::query("UPDATE todo SET todo_title = ?2, finished = ?3 WHERE todo_id = ?1")
            .bind(todo.todo_id.0.to_string())
            .bind(&todo.todo_title)
            .bind(todo.finished as i64)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todo WHERE todo_id = ?1")
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_unfinished(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM todo WHERE finished = 0")
            .fetch_one(&*self.pool)
            .await?;
        Ok(row.get::<i64, _>("cnt"))
    }
}

fn row_to_todo(row: SqliteRow) -> Todo {
    let id_str: String = row.get("todo_id");
    let todo_title: String = row.get("todo_title");
    let finished: i64 = row.get("finished");
    let created_at_str: String = row.get("created_at");

    let created_at = DateTime::parse_from_rfc3339(&created_at_str).unwrap().with_timezone(&Utc);

    Todo {
        todo_id: TodoId(Uuid::parse_str(&id_str).unwrap()),
        todo_title,
        finished: finished != 0,
        created_at,
    }
}
