use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use crate::error::ApiError;
use crate::models::todo::{DeletedTodo, NewTodo};
use crate::repository::TodoRepository;

type Repository = web::Data<dyn TodoRepository>;

#[post("/todo")]
pub async fn create_todo(
    db: Repository,
    new_todo: web::Json<NewTodo>,
) -> Result<HttpResponse, ApiError> {
    let new_todo = new_todo.into_inner();
    let todo = web::block(move || db.create_todo(new_todo)).await??;
    Ok(HttpResponse::Created().json(todo))
}

#[get("/todo")]
pub async fn get_todos(db: Repository) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || db.get_todos()).await??;
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todo/{id}")]
pub async fn get_todo_by_id(
    db: Repository,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = row_id(id.into_inner())?;
    let todo = web::block(move || db.get_todo_by_id(todo_id))
        .await??
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

#[put("/todo/{id}")]
pub async fn update_todo_by_id(
    db: Repository,
    id: web::Path<i64>,
    updated_todo: web::Json<NewTodo>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = row_id(id.into_inner())?;
    let updated_todo = updated_todo.into_inner();
    let todo = web::block(move || db.update_todo_by_id(todo_id, updated_todo))
        .await??
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

// Existence check and delete are separate statements with no transaction around them.
#[delete("/todo/{id}")]
pub async fn delete_todo_by_id(
    db: Repository,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = row_id(id.into_inner())?;
    let deleted = web::block(move || -> Result<usize, ApiError> {
        db.get_todo_by_id(todo_id)?.ok_or(ApiError::NotFound)?;
        Ok(db.delete_todo_by_id(todo_id)?)
    })
    .await??;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(HttpResponse::Ok().json(DeletedTodo::new(todo_id)))
}

/// Integers outside the `SERIAL` range can never match a row.
fn row_id(id: i64) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| ApiError::NotFound)
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        tracing::debug!(error = %err, "rejected path");
        ApiError::BadRequest("Invalid todo id".to_string()).into()
    })
}

// Bodies are decoded as JSON whatever Content-Type the client sent.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, _req: &HttpRequest| {
            ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
        })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/go")
            .app_data(path_config())
            .app_data(json_config())
            .service(create_todo)
            .service(get_todos)
            .service(get_todo_by_id)
            .service(update_todo_by_id)
            .service(delete_todo_by_id),
    );
}
