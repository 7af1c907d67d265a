use thiserror::Error;

use crate::models::todo::{NewTodo, Todo};

pub mod database;
#[cfg(test)]
pub mod memory;
pub mod schema;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Storage for todos. Calls block; handlers run them on the blocking pool.
pub trait TodoRepository: Send + Sync {
    fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, RepositoryError>;

    fn get_todos(&self) -> Result<Vec<Todo>, RepositoryError>;

    fn get_todo_by_id(&self, todo_id: i32) -> Result<Option<Todo>, RepositoryError>;

    /// Writes the new text, then reads the row back. `None` if no row has `todo_id`
    /// by the time of the read.
    fn update_todo_by_id(&self, todo_id: i32, todo: NewTodo)
        -> Result<Option<Todo>, RepositoryError>;

    /// Returns the number of rows removed.
    fn delete_todo_by_id(&self, todo_id: i32) -> Result<usize, RepositoryError>;
}
