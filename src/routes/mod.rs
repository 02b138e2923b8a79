use std::sync::Arc;

use axum::{Router, routing::get};

use crate::AppState;

pub mod web;

// Server-side rendered web frontend.
pub fn get_web_router() -> Router<Arc<AppState>> {
    Router::new()
        // Jokes
        .route("/jokes", get(web::view_random_joke))
        .route("/jokes/new", get(web::view_joke_form).post(web::new_joke))
        .route("/jokes/{joke_id}", get(web::view_joke))
        // Posts
        .route("/posts", get(web::view_posts))
}
