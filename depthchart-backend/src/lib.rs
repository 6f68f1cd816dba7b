pub mod config;
mod error;
pub mod helpers;
pub mod loader;
mod routes;
mod validation;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use depthchart_store::DepthChartStore;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub store: DepthChartStore,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per second for add/remove endpoints
    pub write_per_sec: u64,
    /// Burst size for add/remove endpoints
    pub write_burst: u32,
    /// Requests per second for chart and backup queries
    pub read_per_sec: u64,
    /// Burst size for chart and backup queries
    pub read_burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            write_per_sec: 20,
            write_burst: 40,
            read_per_sec: 50,
            read_burst: 100,
        }
    }
}

impl From<&config::Config> for RateLimitConfig {
    fn from(config: &config::Config) -> Self {
        Self {
            write_per_sec: config.rate_limit_write_per_sec,
            write_burst: config.rate_limit_write_burst,
            read_per_sec: config.rate_limit_read_per_sec,
            read_burst: config.rate_limit_read_burst,
        }
    }
}

/// Interval after which the governor hands back one request slot.
/// `None` for a zero rate; rates above 1e9/sec clamp to one nanosecond.
fn replenish_period(per_sec: u64) -> Option<Duration> {
    let nanos = 1_000_000_000u64.checked_div(per_sec)?;
    Some(Duration::from_nanos(nanos.max(1)))
}

/// Wrap a route group in a per-IP rate limiter.
/// A zero rate or burst leaves the group unlimited.
fn rate_limited(routes: Router<Arc<AppState>>, per_sec: u64, burst: u32) -> Router<Arc<AppState>> {
    let Some(period) = replenish_period(per_sec) else {
        tracing::warn!(per_sec, burst, "zero rate limit, route group left unlimited");
        return routes;
    };
    match GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
    {
        Some(governor) => routes.layer(GovernorLayer::new(governor)),
        None => {
            tracing::warn!(per_sec, burst, "zero burst size, route group left unlimited");
            routes
        }
    }
}

/// Create the application router over the given store.
///
/// Rate limiting needs the client address, so it is only enabled when the
/// router is served with connect info; pass `None` to skip it.
pub fn create_app(
    store: DepthChartStore,
    request_body_limit: usize,
    request_timeout: Duration,
    rate_limit: Option<RateLimitConfig>,
) -> Router {
    let state = Arc::new(AppState { store });

    let mut write_routes = Router::new().route(
        "/api/v1/{league}/teams/{team}/depth-chart/{position}",
        post(routes::add_player).delete(routes::remove_player),
    );

    let mut read_routes = Router::new()
        .route(
            "/api/v1/{league}/teams/{team}/depth-chart/{position}/backups",
            post(routes::backups),
        )
        .route(
            "/api/v1/{league}/teams/{team}/depth-chart",
            get(routes::full_chart),
        );

    if let Some(limits) = rate_limit {
        write_routes = rate_limited(write_routes, limits.write_per_sec, limits.write_burst);
        read_routes = rate_limited(read_routes, limits.read_per_sec, limits.read_burst);
    }

    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .merge(write_routes)
        .merge(read_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(RequestBodyLimitLayer::new(request_body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
