use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::seo_settings::handlers;
use crate::features::seo_settings::services::SeoSettingsService;

pub fn public_routes(service: Arc<SeoSettingsService>) -> Router {
    Router::new()
        .route("/api/seo-settings", get(handlers::get_seo_settings))
        .with_state(service)
}

pub fn protected_routes(service: Arc<SeoSettingsService>) -> Router {
    Router::new()
        .route("/api/seo-settings", put(handlers::update_seo_settings))
        .with_state(service)
}
