// HTTP request handlers
use crate::application::tracking_service::TrackingLookup;
use crate::domain::request::{TrackingQuery, TrackingRequest};
use crate::domain::tracking::{TrackingData, VesselInfo};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct BookingQuery {
    #[serde(alias = "scac_code", alias = "scacCode")]
    pub scac: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

async fn lookup(state: &AppState, request: TrackingRequest) -> Result<Json<TrackingLookup>, ApiError> {
    match state.tracking_service.lookup(&request).await {
        Some(lookup) => Ok(Json(lookup)),
        None => Err(ApiError::Unavailable(request.to_string())),
    }
}

/// Track a shipment by whichever identifier the body carries
pub async fn track_shipment(
    State(state): State<Arc<AppState>>,
    Json(query): Json<TrackingQuery>,
) -> Result<Json<TrackingLookup>, ApiError> {
    let request = TrackingRequest::try_from(query)?;
    lookup(&state, request).await
}

pub async fn track_container(
    Path(number): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrackingLookup>, ApiError> {
    let query = TrackingQuery {
        container_number: Some(number),
        ..Default::default()
    };
    lookup(&state, TrackingRequest::try_from(query)?).await
}

pub async fn track_booking(
    Path(number): Path<String>,
    Query(params): Query<BookingQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrackingLookup>, ApiError> {
    let query = TrackingQuery {
        booking_number: Some(number),
        scac_code: params.scac,
        ..Default::default()
    };
    lookup(&state, TrackingRequest::try_from(query)?).await
}

/// Track several shipments concurrently; failed lookups are `null` in the response
pub async fn track_batch(
    State(state): State<Arc<AppState>>,
    Json(queries): Json<Vec<TrackingQuery>>,
) -> Result<Json<Vec<Option<TrackingLookup>>>, ApiError> {
    let max = state.tracking_service.max_batch_size();
    if queries.len() > max {
        return Err(ApiError::BatchTooLarge {
            size: queries.len(),
            max,
        });
    }

    let requests = queries
        .into_iter()
        .enumerate()
        .map(|(index, query)| {
            TrackingRequest::try_from(query)
                .map_err(|source| ApiError::InvalidBatchEntry { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Tracking batch of {} shipments", requests.len());
    Ok(Json(state.tracking_service.lookup_many(&requests).await))
}

pub async fn vessel_position(
    Path(imo): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<VesselInfo>, ApiError> {
    match state.tracking_service.vessel(&imo).await {
        Some(vessel) => Ok(Json(vessel)),
        None => Err(ApiError::VesselNotFound(imo)),
    }
}

/// Demo records for UI development without a live key
pub async fn demo_tracking(State(state): State<Arc<AppState>>) -> Json<Vec<TrackingData>> {
    Json(state.tracking_service.demo().shipments)
}
