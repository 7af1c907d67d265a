use std::sync::{Arc, Mutex};

use crate::models::todo::{NewTodo, Todo};
use crate::repository::{RepositoryError, TodoRepository};

/// In-process store with serial ids. Ids are never handed out twice.
#[derive(Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    todos: Vec<Todo>,
    last_id: i32,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoRepository for MemoryDatabase {
    fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let todo = Todo {
            id: state.last_id,
            todo: Some(new_todo.todo),
        };
        state.todos.push(todo.clone());
        Ok(todo)
    }

    fn get_todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.todos.clone())
    }

    fn get_todo_by_id(&self, todo_id: i32) -> Result<Option<Todo>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.todos.iter().find(|t| t.id == todo_id).cloned())
    }

    fn update_todo_by_id(
        &self,
        todo_id: i32,
        todo: NewTodo,
    ) -> Result<Option<Todo>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo_id) {
            existing.todo = Some(todo.todo);
        }
        drop(state);
        self.get_todo_by_id(todo_id)
    }

    fn delete_todo_by_id(&self, todo_id: i32) -> Result<usize, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.todos.len();
        state.todos.retain(|t| t.id != todo_id);
        Ok(before - state.todos.len())
    }
}

/// Store whose every call fails as if the database connection had dropped.
pub struct FailingDatabase;

impl FailingDatabase {
    fn broken<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Query(
            diesel::result::Error::BrokenTransactionManager,
        ))
    }
}

impl TodoRepository for FailingDatabase {
    fn create_todo(&self, _new_todo: NewTodo) -> Result<Todo, RepositoryError> {
        Self::broken()
    }

    fn get_todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        Self::broken()
    }

    fn get_todo_by_id(&self, _todo_id: i32) -> Result<Option<Todo>, RepositoryError> {
        Self::broken()
    }

    fn update_todo_by_id(
        &self,
        _todo_id: i32,
        _todo: NewTodo,
    ) -> Result<Option<Todo>, RepositoryError> {
        Self::broken()
    }

    fn delete_todo_by_id(&self, _todo_id: i32) -> Result<usize, RepositoryError> {
        Self::broken()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            todo: text.to_string(),
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let db = MemoryDatabase::new();
        let first = db.create_todo(new_todo("a")).unwrap();
        assert_eq!(db.delete_todo_by_id(first.id).unwrap(), 1);
        let second = db.create_todo(new_todo("b")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn update_of_missing_row_reloads_nothing() {
        let db = MemoryDatabase::new();
        assert_eq!(db.update_todo_by_id(7, new_todo("x")).unwrap(), None);
        assert!(db.get_todos().unwrap().is_empty());
    }

    #[test]
    fn delete_of_missing_row_affects_nothing() {
        let db = MemoryDatabase::new();
        db.create_todo(new_todo("keep")).unwrap();
        assert_eq!(db.delete_todo_by_id(42).unwrap(), 0);
        assert_eq!(db.get_todos().unwrap().len(), 1);
    }
}
