use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::posts::handlers;
use crate::features::posts::services::PostService;

/// Read-only post routes (no authentication required)
pub fn public_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/{id}", get(handlers::get_post))
        .with_state(service)
}

/// Post write routes, mounted behind the bearer-token middleware
pub fn protected_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/api/posts", post(handlers::create_post))
        .route(
            "/api/posts/{id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
        .with_state(service)
}
