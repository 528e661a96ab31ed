mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::schema::SchemaManager;
use crate::core::{database, middleware};
use crate::features::articles::{routes as articles_routes, ArticleService};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, TokenService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::footer_content::{routes as footer_routes, FooterContentService};
use crate::features::home_content::{routes as home_routes, HomeContentService};
use crate::features::media::{routes as media_routes, MediaService};
use crate::features::posts::{routes as posts_routes, PostService};
use crate::features::seo_settings::{routes as seo_routes, SeoSettingsService};
use crate::modules::storage::LocalStorage;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "House Design API is running",
    }))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Tables, column migrations, backfills and seeds
    SchemaManager::new(pool.clone(), &config.auth)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Schema setup failed: {}", e))?;

    // Auth
    let token_service = Arc::new(TokenService::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(pool.clone(), Arc::clone(&token_service)));
    tracing::info!("Auth services initialized");

    // Content
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let post_service = Arc::new(PostService::new(pool.clone()));
    let article_service = Arc::new(ArticleService::new(pool.clone()));
    let home_content_service = Arc::new(HomeContentService::new(pool.clone()));
    let footer_content_service = Arc::new(FooterContentService::new(pool.clone()));
    let seo_settings_service = Arc::new(SeoSettingsService::new(pool.clone()));
    tracing::info!("Content services initialized");

    // Media
    let storage = Arc::new(LocalStorage::new(&config.storage));
    let media_service = Arc::new(MediaService::new(Arc::clone(&storage)));
    tracing::info!(
        "Media storage initialized (data: {}, homepage: {})",
        config.storage.data_dir.display(),
        config.storage.homepage_dir.display()
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .merge(categories_routes::protected_routes(Arc::clone(&category_service)))
        .merge(posts_routes::protected_routes(Arc::clone(&post_service)))
        .merge(articles_routes::protected_routes(Arc::clone(&article_service)))
        .merge(home_routes::protected_routes(Arc::clone(&home_content_service)))
        .merge(footer_routes::protected_routes(Arc::clone(&footer_content_service)))
        .merge(seo_routes::protected_routes(Arc::clone(&seo_settings_service)))
        .merge(media_routes::protected_routes(Arc::clone(&media_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&token_service),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(categories_routes::public_routes(category_service))
        .merge(posts_routes::public_routes(post_service))
        .merge(articles_routes::public_routes(article_service))
        .merge(home_routes::public_routes(home_content_service))
        .merge(footer_routes::public_routes(footer_content_service))
        .merge(seo_routes::public_routes(seo_settings_service))
        .merge(media_routes::public_routes(media_service))
        .route("/health", axum::routing::get(health_check));

    // Uploaded media served straight from disk
    let static_files = Router::new()
        .nest_service("/data", ServeDir::new(&config.storage.data_dir))
        .nest_service("/homepage", ServeDir::new(&config.storage.homepage_dir));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(static_files)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
