// API error responses
use crate::domain::request::TrackingRequestError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidRequest(#[from] TrackingRequestError),
    #[error("request {index}: {source}")]
    InvalidBatchEntry {
        index: usize,
        source: TrackingRequestError,
    },
    #[error("batch of {size} requests exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },
    #[error("tracking data unavailable for {0}")]
    Unavailable(String),
    #[error("vessel {0} not found")]
    VesselNotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::InvalidBatchEntry { .. }
            | ApiError::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::VesselNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}
