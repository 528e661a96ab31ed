use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::home_content::handlers;
use crate::features::home_content::services::HomeContentService;

pub fn public_routes(service: Arc<HomeContentService>) -> Router {
    Router::new()
        .route("/api/home-content", get(handlers::get_home_content))
        .with_state(service)
}

pub fn protected_routes(service: Arc<HomeContentService>) -> Router {
    Router::new()
        .route("/api/home-content", put(handlers::update_home_content))
        .with_state(service)
}
