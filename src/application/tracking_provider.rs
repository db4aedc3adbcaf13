// Provider trait for live tracking data access
use crate::domain::request::TrackingRequest;
use async_trait::async_trait;
use serde_json::Value;

/// Raw access to a container/vessel tracking provider.
///
/// `None` is the only failure signal; implementations log and swallow
/// transport errors and non-2xx responses.
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    /// Look up a shipment and return the provider's raw payload.
    async fn track(&self, request: &TrackingRequest) -> Option<Value>;

    /// Fetch the raw vessel record for an IMO number.
    async fn vessel(&self, imo: &str) -> Option<Value>;
}
