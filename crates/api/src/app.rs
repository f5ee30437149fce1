//! Router assembly and shared application state.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::repositories::{AdminSettingsRepository, ContactRepository, QuoteRepository};

use crate::config::Config;
use crate::middleware::{
    auth_rate_limit_middleware, metrics_handler, metrics_middleware, security_headers_middleware,
    trace_id, RateLimiterState,
};
use crate::routes::{auth, contacts, health, quotes};
use crate::services::AdminAuthService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub auth: AdminAuthService,
    pub contacts: ContactRepository,
    pub quotes: QuoteRepository,
    pub auth_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting on the passcode endpoints; 0 disables it
    let auth_limiter = if config.security.auth_rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.auth_rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        auth: AdminAuthService::new(AdminSettingsRepository::new(pool.clone())),
        contacts: ContactRepository::new(pool.clone()),
        quotes: QuoteRepository::new(pool),
        auth_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Passcode endpoints, behind the per-IP limiter
    let auth_routes = Router::new()
        .route("/auth/admin", post(auth::login))
        .route("/auth/admin/change-password", post(auth::change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ));

    // Submission routes: public POST for the site forms, the rest serves
    // the admin dashboard
    let submission_routes = Router::new()
        .route(
            "/contact",
            post(contacts::create_contact).get(contacts::list_contacts),
        )
        .route(
            "/contact/:id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route("/quote", post(quotes::create_quote).get(quotes::list_quotes))
        .route(
            "/quote/:id",
            get(quotes::get_quote)
                .put(quotes::update_quote)
                .delete(quotes::delete_quote),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(submission_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
