use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use depthchart_store::{CatalogError, StoreError};
use serde::Serialize;

use crate::helpers::now;

/// API error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
  /// Unix seconds when the error was produced
  pub timestamp: i64,
}

impl ErrorResponse {
  pub fn new(error: impl Into<String>) -> Self {
    Self {
      error: error.into(),
      details: None,
      timestamp: now(),
    }
  }

  pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
    Self {
      error: error.into(),
      details: Some(details.into()),
      timestamp: now(),
    }
  }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
  Store(StoreError),
  ValidationError(String),
}

/// Short machine-readable label for a store error
fn error_kind(err: &StoreError) -> &'static str {
  match err {
    StoreError::InvalidPlayer(_) => "invalid_player",
    StoreError::InvalidRank(_) => "invalid_rank",
    StoreError::InvalidKey(CatalogError::MissingField(_)) => "invalid_key",
    StoreError::InvalidKey(CatalogError::UnknownLeague(_)) => "unknown_league",
    StoreError::InvalidKey(CatalogError::UnknownTeam { .. }) => "unknown_team",
    StoreError::InvalidKey(CatalogError::UnknownPosition { .. }) => "unknown_position",
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match self {
      AppError::Store(err) => {
        // Every store error is a caller mistake
        tracing::warn!(store_error = %err, "Request rejected");
        let error_response = ErrorResponse::with_details(error_kind(&err), err.to_string());
        (StatusCode::BAD_REQUEST, Json(error_response)).into_response()
      }
      AppError::ValidationError(msg) => {
        tracing::warn!(validation_error = %msg, "Validation failed");
        let error_response = ErrorResponse::new(msg);
        (StatusCode::BAD_REQUEST, Json(error_response)).into_response()
      }
    }
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    AppError::Store(err)
  }
}

impl From<CatalogError> for AppError {
  fn from(err: CatalogError) -> Self {
    AppError::Store(err.into())
  }
}

impl From<crate::validation::ValidationError> for AppError {
  fn from(err: crate::validation::ValidationError) -> Self {
    AppError::ValidationError(err.to_string())
  }
}
