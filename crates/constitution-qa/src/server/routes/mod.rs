//! API routes for the question-answering server

pub mod articles;
pub mod ask;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health_check))
        .route("/ask", post(ask::ask))
        .route("/articles", get(articles::list_articles))
}
