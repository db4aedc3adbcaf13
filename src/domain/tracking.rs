// Tracking domain models
use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::classify_status;

/// Coarse shipment status derived from the latest tracking event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Unknown,
    Delivered,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "At Port")]
    AtPort,
    Loading,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Unknown => "Unknown",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::AtPort => "At Port",
            ShipmentStatus::Loading => "Loading",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingLocation {
    /// ISO-8601 timestamp as reported by the provider.
    pub timestamp: String,
    pub location: Place,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselPosition {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<VesselPosition>,
}

/// Canonical, provider-agnostic tracking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_of_lading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_number: Option<String>,
    pub locations: Vec<TrackingLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel: Option<VesselInfo>,
    pub status: ShipmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_arrival: Option<String>,
}

pub const UNKNOWN_REFERENCE: &str = "Unknown";

impl TrackingData {
    /// Build a record whose reference and status are derived from its identifiers and locations.
    pub fn new(
        container_number: Option<String>,
        booking_number: Option<String>,
        bill_of_lading: Option<String>,
        locations: Vec<TrackingLocation>,
        vessel: Option<VesselInfo>,
    ) -> Self {
        let reference = reference_for(container_number.as_deref(), booking_number.as_deref());
        let status = classify_status(&locations);
        Self {
            reference,
            container_number,
            bill_of_lading,
            booking_number,
            locations,
            vessel,
            status,
            estimated_arrival: None,
            actual_arrival: None,
        }
    }

    pub fn with_arrivals(mut self, estimated: Option<String>, actual: Option<String>) -> Self {
        self.estimated_arrival = estimated;
        self.actual_arrival = actual;
        self
    }
}

/// Container number, then booking number, then "Unknown".
pub fn reference_for(container_number: Option<&str>, booking_number: Option<&str>) -> String {
    container_number
        .or(booking_number)
        .unwrap_or(UNKNOWN_REFERENCE)
        .to_string()
}
