// Shipment status classification
use super::tracking::{ShipmentStatus, TrackingLocation};

/// Keyword rules checked in order against the latest event; first match wins.
const STATUS_RULES: &[(&[&str], ShipmentStatus)] = &[
    (&["delivered", "discharge"], ShipmentStatus::Delivered),
    (&["departure", "sail"], ShipmentStatus::InTransit),
    (&["arrival", "berth"], ShipmentStatus::AtPort),
    (&["load"], ShipmentStatus::Loading),
];

/// Derive the shipment status from the last location event.
///
/// Only an empty sequence yields `Unknown`; an unrecognized event falls back to `InTransit`.
pub fn classify_status(locations: &[TrackingLocation]) -> ShipmentStatus {
    match locations.last() {
        Some(latest) => classify_event(&latest.event),
        None => ShipmentStatus::Unknown,
    }
}

pub fn classify_event(event: &str) -> ShipmentStatus {
    let event = event.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| event.contains(k)))
        .map(|(_, status)| *status)
        .unwrap_or(ShipmentStatus::InTransit)
}
