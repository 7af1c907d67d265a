use std::sync::Arc;

use actix_web::middleware::from_fn;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::api::middleware;
use crate::config::Config;
use crate::repository::database::Database;
use crate::repository::TodoRepository;

mod api;
mod config;
mod error;
mod models;
mod repository;
mod telemetry;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[get("/health")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> Result<HttpResponse> {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    Ok(HttpResponse::NotFound().json(response))
}

fn setup(repository: Arc<dyn TodoRepository>) -> web::Data<dyn TodoRepository> {
    web::Data::from(repository)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_subscriber(env!("CARGO_PKG_NAME"))?;

    let config = Config::from_env().context("failed to load configuration")?;
    let todo_db = Database::connect(&config.database_url).context("failed to prepare database")?;
    let app_data = setup(Arc::new(todo_db));

    tracing::info!(host = %config.host, port = config.port, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(api::api::config)
            .service(healthcheck)
            .default_service(web::route().to(not_found))
            .wrap(middleware::json_content_type())
            .wrap(from_fn(middleware::cors))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
