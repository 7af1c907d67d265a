use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

/// A persisted todo row. `todo` is NULL only if something other than this API wrote it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::repository::schema::todo)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Todo {
    pub id: i32,
    #[diesel(column_name = body)]
    pub todo: Option<String>,
}

/// Request body for create and update.
#[derive(Serialize, Deserialize, Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = crate::repository::schema::todo)]
pub struct NewTodo {
    #[diesel(column_name = body)]
    pub todo: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeletedTodo {
    pub message: String,
    pub id: i32,
}

impl DeletedTodo {
    pub fn new(id: i32) -> Self {
        Self {
            message: "Todo deleted".to_string(),
            id,
        }
    }
}
