use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post, put},
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

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_auth, require_staff,
    security_headers_middleware, trace_id,
};
use crate::routes::{check_in, events, health, match_profiles, matchmaking, registrations, users};
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

/// Builds the JWT validation config from the application config.
fn build_jwt_config(config: &Config) -> anyhow::Result<JwtConfig> {
    match config.jwt.algorithm.as_str() {
        "hs256" => Ok(JwtConfig::from_secret(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
            config.jwt.leeway_secs,
        )),
        _ => JwtConfig::from_rsa_pem(
            &config.jwt.private_key,
            &config.jwt.public_key,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
            config.jwt.leeway_secs,
        )
        .context("Failed to load JWT RSA keys"),
    }
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let jwt = Arc::new(build_jwt_config(&config)?);
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
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

    // Routes available to any authenticated participant
    let authed_routes = Router::new()
        .route(
            "/api/v1/matchmaking/suggestions",
            post(matchmaking::generate_suggestions).get(matchmaking::get_suggestions),
        )
        .route(
            "/api/v1/events/:event_id/match-profile",
            put(match_profiles::upsert_match_profile).get(match_profiles::get_match_profile),
        )
        .route("/api/v1/events/:event_id", get(events::get_event))
        .route("/api/v1/me", get(users::get_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Routes restricted to staff and organizers
    let staff_routes = Router::new()
        .route("/api/v1/check-in", post(check_in::check_in))
        .route("/api/v1/events", post(events::create_event))
        .route(
            "/api/v1/events/:event_id/registrations",
            post(registrations::create_registration).get(registrations::list_registrations),
        )
        // Role check runs after auth (needs UserAuth from extensions)
        .route_layer(middleware::from_fn(require_staff))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    let app = Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(staff_routes)
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
        .with_state(state);

    Ok(app)
}
