// Tracking service - Use cases for shipment and vessel lookups
use crate::application::demo_data::demo_tracking_data;
use crate::application::tracking_provider::TrackingProvider;
use crate::domain::request::TrackingRequest;
use crate::domain::tracking::{reference_for, TrackingData, VesselInfo};
use crate::infrastructure::provider_payload::{normalize_tracking, normalize_vessel};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Demo,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingLookup {
    pub source: DataSource,
    pub shipments: Vec<TrackingData>,
}

impl TrackingLookup {
    pub fn live(data: TrackingData) -> Self {
        Self {
            source: DataSource::Live,
            shipments: vec![data],
        }
    }

    pub fn demo() -> Self {
        Self {
            source: DataSource::Demo,
            shipments: demo_tracking_data(),
        }
    }
}

const DEFAULT_BATCH_CONCURRENCY: usize = 8;
const DEFAULT_MAX_BATCH_SIZE: usize = 100;

#[derive(Clone)]
pub struct TrackingService {
    provider: Arc<dyn TrackingProvider>,
    demo_fallback: bool,
    batch_concurrency: usize,
    max_batch_size: usize,
}

impl TrackingService {
    pub fn new(provider: Arc<dyn TrackingProvider>, demo_fallback: bool) -> Self {
        Self {
            provider,
            demo_fallback,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Cap provider calls in flight per batch and the number of entries a batch may hold.
    pub fn with_batch_limits(mut self, concurrency: usize, max_batch_size: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Fetch and normalize live tracking data; `None` when the provider call failed.
    pub async fn track(&self, request: &TrackingRequest) -> Option<TrackingData> {
        let payload = self.provider.track(request).await?;
        let mut data = normalize_tracking(&payload);

        // Providers do not always echo the identifier back.
        if data.container_number.is_none()
            && data.booking_number.is_none()
            && data.bill_of_lading.is_none()
        {
            let identifier = Some(request.identifier().to_string());
            match request {
                TrackingRequest::Container(_) => data.container_number = identifier,
                TrackingRequest::Booking { .. } => data.booking_number = identifier,
                TrackingRequest::BillOfLading(_) => data.bill_of_lading = identifier,
            }
            data.reference =
                reference_for(data.container_number.as_deref(), data.booking_number.as_deref());
        }

        Some(data)
    }

    /// Live lookup, falling back to demo records when enabled.
    pub async fn lookup(&self, request: &TrackingRequest) -> Option<TrackingLookup> {
        if let Some(data) = self.track(request).await {
            return Some(TrackingLookup::live(data));
        }

        if self.demo_fallback {
            tracing::warn!("No live tracking data for {}, serving demo records", request);
            Some(TrackingLookup::demo())
        } else {
            tracing::warn!("No live tracking data for {}", request);
            None
        }
    }

    /// Run several lookups, at most `batch_concurrency` at a time; results keep the request order.
    pub async fn lookup_many(&self, requests: &[TrackingRequest]) -> Vec<Option<TrackingLookup>> {
        let lookups: Vec<_> = requests.iter().map(|request| self.lookup(request)).collect();
        stream::iter(lookups)
            .buffered(self.batch_concurrency)
            .collect()
            .await
    }

    pub async fn vessel(&self, imo: &str) -> Option<VesselInfo> {
        let payload = self.provider.vessel(imo).await?;
        let mut vessel = normalize_vessel(&payload)?;
        if vessel.imo.is_none() {
            vessel.imo = Some(imo.to_string());
        }
        Some(vessel)
    }

    pub fn demo(&self) -> TrackingLookup {
        TrackingLookup::demo()
    }
}
