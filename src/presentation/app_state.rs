// Application state for HTTP handlers
use crate::application::tracking_service::TrackingService;

#[derive(Clone)]
pub struct AppState {
    pub tracking_service: TrackingService,
}
