//! Router assembly and the transport-level middleware stack.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::config::{AppConfig, ALLOWED_ORIGIN, BODY_LIMIT, CORS_MAX_AGE};
use crate::state::AppState;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Route table and layer settings, separated from `AppConfig` so tests can build a router
/// without database settings.
#[derive(Clone, Copy, Debug)]
pub struct RouterOptions {
    pub delete_routes_enabled: bool,
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        RouterOptions {
            delete_routes_enabled: true,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&AppConfig> for RouterOptions {
    fn from(cfg: &AppConfig) -> Self {
        RouterOptions {
            delete_routes_enabled: cfg.delete_routes_enabled,
            request_timeout: cfg.request_timeout,
        }
    }
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([HeaderValue::from_static(ALLOWED_ORIGIN)]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

/// Full application: entity and common routes behind tracing, CORS, timeout and body limit.
pub fn app(state: AppState, options: RouterOptions) -> Router {
    if !options.delete_routes_enabled {
        tracing::warn!("DELETE routes are disabled; deletes will answer 405");
    }
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state, options.delete_routes_enabled))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
