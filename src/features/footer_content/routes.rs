use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::footer_content::handlers;
use crate::features::footer_content::services::FooterContentService;

pub fn public_routes(service: Arc<FooterContentService>) -> Router {
    Router::new()
        .route("/api/footer-content", get(handlers::get_footer_content))
        .with_state(service)
}

pub fn protected_routes(service: Arc<FooterContentService>) -> Router {
    Router::new()
        .route("/api/footer-content", put(handlers::update_footer_content))
        .with_state(service)
}
