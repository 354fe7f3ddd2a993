//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Json, Router,
};
use orderdesk_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;

/// Headroom added to the upload size limit to cover multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/v0/auth/login", post(handlers::auth::login));

    let protected_routes = Router::new()
        .route("/api/v0/auth/me", get(handlers::auth::me))
        .route(
            "/api/v0/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/api/v0/users/{id}", delete(handlers::users::delete_user))
        .route(
            "/api/v0/users/{id}/password",
            put(handlers::users::change_password),
        )
        .route("/api/v0/imports", post(handlers::imports::upload_import))
        .route(
            "/api/v0/imports/{batch_id}/confirm",
            post(handlers::imports::confirm_import),
        )
        .route("/api/v0/orders", get(handlers::orders::list_orders))
        .route(
            "/api/v0/orders/{id}/contacts",
            get(handlers::contacts::list_order_contacts),
        )
        .route(
            "/api/v0/contacts/seed",
            post(handlers::contacts::seed_contacts),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1024)
        .max(1);

    let app = public_routes
        .merge(protected_routes)
        .merge(
            RapiDoc::with_openapi("/api/openapi.json", crate::api_doc::ApiDoc::openapi())
                .path("/docs"),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(
            config.max_upload_size_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    };
    Ok(cors)
}
