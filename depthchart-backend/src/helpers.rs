use axum::http::HeaderName;
use rand::distr::{Alphanumeric, SampleString};
use rand::rng;
use std::time::{SystemTime, UNIX_EPOCH};

pub const CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");

/// Random id attached to a request's log lines and echoed back to the caller.
pub fn correlation_id() -> String {
  Alphanumeric.sample_string(&mut rng(), 16)
}

/// Current unix time in seconds.
pub fn now() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map_or(0, |d| d.as_secs() as i64)
}

/// Canonical URL of a position's depth chart, built from normalized parts.
pub fn chart_location(key: &depthchart_store::RosterKey) -> String {
  format!(
    "/api/v1/{}/teams/{}/depth-chart/{}",
    key.league(),
    key.team(),
    key.position()
  )
}
