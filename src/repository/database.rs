use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};

use crate::models::todo::{NewTodo, Todo};
use crate::repository::schema::todo;
use crate::repository::{RepositoryError, TodoRepository};

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;
type DBConnection = PooledConnection<ConnectionManager<PgConnection>>;

const CREATE_TODO_TABLE: &str = "CREATE TABLE IF NOT EXISTS todo (id SERIAL PRIMARY KEY, todo TEXT)";

#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    /// Builds the pool and makes sure the `todo` table exists.
    pub fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool: DBPool = r2d2::Pool::builder().build(manager)?;
        let database = Database { pool };
        database.create_table()?;
        Ok(database)
    }

    fn create_table(&self) -> Result<(), RepositoryError> {
        diesel::sql_query(CREATE_TODO_TABLE).execute(&mut self.connection()?)?;
        tracing::info!("todo table ready");
        Ok(())
    }

    fn connection(&self) -> Result<DBConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }
}

impl TodoRepository for Database {
    fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, RepositoryError> {
        let todo = diesel::insert_into(todo::table)
            .values(&new_todo)
            .returning(Todo::as_returning())
            .get_result(&mut self.connection()?)?;
        Ok(todo)
    }

    fn get_todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        let todos = todo::table
            .select(Todo::as_select())
            .order(todo::id)
            .load(&mut self.connection()?)?;
        Ok(todos)
    }

    fn get_todo_by_id(&self, todo_id: i32) -> Result<Option<Todo>, RepositoryError> {
        let todo = todo::table
            .find(todo_id)
            .select(Todo::as_select())
            .first(&mut self.connection()?)
            .optional()?;
        Ok(todo)
    }

    fn update_todo_by_id(
        &self,
        todo_id: i32,
        changes: NewTodo,
    ) -> Result<Option<Todo>, RepositoryError> {
        let mut conn = self.connection()?;
        diesel::update(todo::table.find(todo_id))
            .set(&changes)
            .execute(&mut conn)?;
        let todo = todo::table
            .find(todo_id)
            .select(Todo::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(todo)
    }

    fn delete_todo_by_id(&self, todo_id: i32) -> Result<usize, RepositoryError> {
        let count = diesel::delete(todo::table.find(todo_id)).execute(&mut self.connection()?)?;
        Ok(count)
    }
}
