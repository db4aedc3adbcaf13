// Mapper from tracking provider payloads to canonical domain models
//
// Every provider field is optional and read leniently: a field with an
// unexpected type is treated as absent, so normalization never fails.
use crate::domain::tracking::{
    Coordinates, Place, TrackingData, TrackingLocation, VesselInfo, VesselPosition,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_EVENT: &str = "Unknown Event";

/// Accepted key spellings per field; the first spelling is the canonical key.
type Spellings = &'static [&'static [&'static str]];

/// Provider record whose alternative key spellings are collapsed before deserializing.
trait ProviderRecord: DeserializeOwned {
    const SPELLINGS: Spellings;
}

#[derive(Debug, Default, Deserialize)]
struct ProviderPayload {
    #[serde(default, deserialize_with = "text")]
    container_number: Option<String>,
    #[serde(default, deserialize_with = "text")]
    booking_number: Option<String>,
    #[serde(default, deserialize_with = "text")]
    bill_of_lading: Option<String>,
    #[serde(default, deserialize_with = "records")]
    locations: Option<Vec<ProviderLocation>>,
    #[serde(default, deserialize_with = "object")]
    vessel: Option<ProviderVessel>,
    #[serde(default, deserialize_with = "text")]
    estimated_arrival: Option<String>,
    #[serde(default, deserialize_with = "text")]
    actual_arrival: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl ProviderRecord for ProviderPayload {
    const SPELLINGS: Spellings = &[
        &["container_number", "containerNumber"],
        &["booking_number", "bookingNumber"],
        &["bill_of_lading", "billOfLading", "bl_number"],
        &["locations", "events"],
        &["estimated_arrival", "estimatedArrival", "eta"],
        &["actual_arrival", "actualArrival", "ata"],
    ];
}

#[derive(Debug, Default, Deserialize)]
struct ProviderLocation {
    #[serde(default, deserialize_with = "text")]
    timestamp: Option<String>,
    /// Either a flat name or a nested place object.
    #[serde(default)]
    location: Option<Value>,
    #[serde(default, deserialize_with = "text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "text")]
    country: Option<String>,
    #[serde(default, deserialize_with = "number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "object")]
    coordinates: Option<ProviderCoordinates>,
    #[serde(default, deserialize_with = "text")]
    event: Option<String>,
    #[serde(default, deserialize_with = "text")]
    description: Option<String>,
}

impl ProviderRecord for ProviderLocation {
    const SPELLINGS: Spellings = &[
        &["timestamp", "date"],
        &["name", "location_name", "locationName"],
        &["lat", "latitude"],
        &["lng", "longitude", "lon"],
        &["event", "event_name", "eventName"],
    ];
}

#[derive(Debug, Default, Deserialize)]
struct ProviderPlace {
    #[serde(default, deserialize_with = "text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "text")]
    country: Option<String>,
    #[serde(default, deserialize_with = "number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "object")]
    coordinates: Option<ProviderCoordinates>,
}

impl ProviderRecord for ProviderPlace {
    const SPELLINGS: Spellings = &[
        &["name", "location_name", "locationName"],
        &["lat", "latitude"],
        &["lng", "longitude", "lon"],
    ];
}

#[derive(Debug, Default, Deserialize)]
struct ProviderCoordinates {
    #[serde(default, deserialize_with = "number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "text")]
    timestamp: Option<String>,
}

impl ProviderRecord for ProviderCoordinates {
    const SPELLINGS: Spellings = &[
        &["lat", "latitude"],
        &["lng", "longitude", "lon"],
        &["timestamp", "time", "last_update"],
    ];
}

#[derive(Debug, Default, Deserialize)]
struct ProviderVessel {
    #[serde(default, deserialize_with = "text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "identifier")]
    imo: Option<String>,
    #[serde(default, deserialize_with = "identifier")]
    mmsi: Option<String>,
    #[serde(default, deserialize_with = "number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "text")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "object")]
    current_position: Option<ProviderCoordinates>,
}

impl ProviderRecord for ProviderVessel {
    const SPELLINGS: Spellings = &[
        &["name", "vessel_name", "vesselName"],
        &["lat", "latitude"],
        &["lng", "longitude", "lon"],
        &["timestamp", "last_update", "position_timestamp"],
        &["current_position", "currentPosition", "position"],
    ];
}

/// Collapse each spelling group onto its canonical key; the first non-null spelling wins.
fn merge_spellings(mut map: Map<String, Value>, spellings: Spellings) -> Map<String, Value> {
    for group in spellings {
        let mut chosen = None;
        for key in group.iter() {
            if let Some(value) = map.remove(*key) {
                if chosen.is_none() && !value.is_null() {
                    chosen = Some(value);
                }
            }
        }
        if let (Some(canonical), Some(value)) = (group.first(), chosen) {
            map.insert(canonical.to_string(), value);
        }
    }
    map
}

/// Read a provider record from a JSON object; anything else counts as absent.
fn read_record<T: ProviderRecord>(value: Value) -> Option<T> {
    let Value::Object(map) = value else {
        return None;
    };
    match serde_json::from_value(Value::Object(merge_spellings(map, T::SPELLINGS))) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Unreadable provider record, ignoring it: {}", e);
            None
        }
    }
}

impl ProviderPayload {
    fn from_json(payload: &Value) -> Self {
        read_record(payload.clone()).unwrap_or_default()
    }

    fn has_tracking_content(&self) -> bool {
        self.container_number.is_some()
            || self.booking_number.is_some()
            || self.bill_of_lading.is_some()
            || self.locations.is_some()
            || self.vessel.is_some()
    }

    /// Unwrap `{ "data": { ... } }` envelopes that carry nothing else.
    ///
    /// Arrival times given beside the envelope fill gaps in the inner record.
    fn unwrap_envelope(self) -> Self {
        if self.has_tracking_content() {
            return self;
        }
        let Some(inner) = self.data.as_ref().filter(|d| d.is_object()) else {
            return self;
        };
        let mut unwrapped = Self::from_json(inner);
        unwrapped.estimated_arrival = unwrapped.estimated_arrival.or(self.estimated_arrival);
        unwrapped.actual_arrival = unwrapped.actual_arrival.or(self.actual_arrival);
        unwrapped
    }
}

impl From<ProviderPayload> for TrackingData {
    fn from(raw: ProviderPayload) -> Self {
        let locations = raw
            .locations
            .unwrap_or_default()
            .into_iter()
            .map(TrackingLocation::from)
            .collect();

        TrackingData::new(
            raw.container_number,
            raw.booking_number,
            raw.bill_of_lading,
            locations,
            raw.vessel.map(VesselInfo::from),
        )
        .with_arrivals(raw.estimated_arrival, raw.actual_arrival)
    }
}

impl From<ProviderLocation> for TrackingLocation {
    fn from(raw: ProviderLocation) -> Self {
        let (flat_name, nested) = match raw.location {
            Some(Value::String(name)) => (non_empty(name), ProviderPlace::default()),
            Some(value @ Value::Object(_)) => {
                (None, read_record::<ProviderPlace>(value).unwrap_or_default())
            }
            _ => (None, ProviderPlace::default()),
        };

        let coordinates = coordinates(raw.coordinates.as_ref(), raw.lat, raw.lng)
            .or_else(|| coordinates(nested.coordinates.as_ref(), nested.lat, nested.lng));

        Self {
            timestamp: raw.timestamp.unwrap_or_default(),
            location: Place {
                name: flat_name
                    .or(nested.name)
                    .or(raw.name)
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                city: raw.city.or(nested.city),
                country: raw.country.or(nested.country),
                coordinates,
            },
            event: raw.event.unwrap_or_else(|| UNKNOWN_EVENT.to_string()),
            description: raw.description,
        }
    }
}

impl From<ProviderVessel> for VesselInfo {
    fn from(raw: ProviderVessel) -> Self {
        let nested_timestamp = raw
            .current_position
            .as_ref()
            .and_then(|p| p.timestamp.clone());
        let current_position = coordinates(raw.current_position.as_ref(), raw.lat, raw.lng).map(
            |c| VesselPosition {
                lat: c.lat,
                lng: c.lng,
                timestamp: nested_timestamp.or(raw.timestamp).unwrap_or_default(),
            },
        );

        Self {
            name: raw.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            imo: raw.imo,
            mmsi: raw.mmsi,
            current_position,
        }
    }
}

/// Normalize a tracking response into canonical `TrackingData`.
pub fn normalize_tracking(payload: &Value) -> TrackingData {
    let raw = ProviderPayload::from_json(payload).unwrap_envelope();
    let data = TrackingData::from(raw);
    tracing::debug!(
        "Normalized tracking payload for {}: {} locations, status {}",
        data.reference,
        data.locations.len(),
        data.status
    );
    data
}

/// Normalize a vessel response; the vessel may be the payload itself or nested under `vessel`.
pub fn normalize_vessel(payload: &Value) -> Option<VesselInfo> {
    let record = match payload.get("vessel") {
        Some(nested) if nested.is_object() => nested,
        _ => payload.get("data").filter(|d| d.is_object()).unwrap_or(payload),
    };
    if !record.is_object() {
        return None;
    }
    let raw = read_record::<ProviderVessel>(record.clone()).unwrap_or_default();
    Some(VesselInfo::from(raw))
}

/// Parse a coordinate from a JSON number or numeric string.
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn coordinates(
    nested: Option<&ProviderCoordinates>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Option<Coordinates> {
    let from_nested = nested.and_then(|c| Some(Coordinates::new(c.lat?, c.lng?)));
    from_nested.or_else(|| Some(Coordinates::new(lat?, lng?)))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Nested records must be JSON objects; arrays and scalars count as absent.
fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: ProviderRecord,
{
    let value = Value::deserialize(deserializer)?;
    Ok(read_record(value))
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => non_empty(s),
        _ => None,
    })
}

/// Vessel identifiers arrive as strings or bare numbers.
fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => non_empty(s.trim().to_string()),
        Value::Number(n) => Some(integral_text(&n)),
        _ => None,
    })
}

/// Render whole numbers without a fractional part (`9456783.0` -> `9456783`).
fn integral_text(n: &serde_json::Number) -> String {
    if let Some(whole) = n.as_u64() {
        return whole.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => (f as u64).to_string(),
        _ => n.to_string(),
    }
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_coordinate(&value))
}

/// Keep the object entries of a record list; anything else counts as absent.
fn records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: ProviderRecord,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| {
                    if !item.is_object() {
                        tracing::debug!("Skipping non-object tracking event: {}", item);
                    }
                    read_record(item)
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tracking::ShipmentStatus;
    use serde_json::json;

    #[test]
    fn test_empty_payload_normalizes_to_unknown() {
        let data = normalize_tracking(&json!({}));
        assert_eq!(data.reference, "Unknown");
        assert!(data.locations.is_empty());
        assert!(data.vessel.is_none());
        assert_eq!(data.status, ShipmentStatus::Unknown);
    }

    #[test]
    fn test_non_object_payloads_never_fail() {
        for payload in [json!(null), json!([1, 2, 3]), json!("oops"), json!(42)] {
            let data = normalize_tracking(&payload);
            assert_eq!(data.reference, "Unknown");
            assert_eq!(data.status, ShipmentStatus::Unknown);
        }
    }

    #[test]
    fn test_wrong_typed_fields_are_ignored() {
        let data = normalize_tracking(&json!({
            "container_number": 12345,
            "booking_number": "BK-77",
            "locations": "not a list",
            "vessel": ["nope"],
        }));
        assert_eq!(data.reference, "BK-77");
        assert!(data.container_number.is_none());
        assert!(data.locations.is_empty());
        assert!(data.vessel.is_none());
    }

    #[test]
    fn test_reference_selection() {
        assert_eq!(normalize_tracking(&json!({"container_number": "X"})).reference, "X");
        assert_eq!(normalize_tracking(&json!({"booking_number": "Y"})).reference, "Y");
        assert_eq!(
            normalize_tracking(&json!({"container_number": "X", "booking_number": "Y"})).reference,
            "X"
        );
        assert_eq!(normalize_tracking(&json!({"bill_of_lading": "Z"})).reference, "Unknown");
    }

    #[test]
    fn test_locations_default_missing_fields() {
        let data = normalize_tracking(&json!({
            "container_number": "MSKU7750050",
            "locations": [{ "timestamp": "2024-01-10T08:00:00Z" }, "garbage", { "event": "Gate In" }]
        }));
        assert_eq!(data.locations.len(), 2);
        assert_eq!(data.locations[0].location.name, "Unknown");
        assert_eq!(data.locations[0].event, "Unknown Event");
        assert_eq!(data.locations[1].timestamp, "");
        assert_eq!(data.status, ShipmentStatus::InTransit);
    }

    #[test]
    fn test_string_and_numeric_coordinates_match() {
        let from_string = normalize_tracking(&json!({
            "locations": [{ "location": "Shanghai", "lat": "31.2304", "lng": "121.4737", "event": "Gate In" }]
        }));
        let from_number = normalize_tracking(&json!({
            "locations": [{ "location": "Shanghai", "lat": 31.2304, "lng": 121.4737, "event": "Gate In" }]
        }));
        let a = from_string.locations[0].location.coordinates;
        let b = from_number.locations[0].location.coordinates;
        assert_eq!(a, Some(Coordinates::new(31.2304, 121.4737)));
        assert_eq!(a, b);
        assert_eq!(from_string.locations[0].location.name, "Shanghai");
    }

    #[test]
    fn test_partial_or_invalid_coordinates_are_dropped() {
        let data = normalize_tracking(&json!({
            "locations": [
                { "lat": "31.2", "event": "Gate In" },
                { "lat": "north", "lng": "121.4", "event": "Gate In" }
            ]
        }));
        assert!(data.locations[0].location.coordinates.is_none());
        assert!(data.locations[1].location.coordinates.is_none());
    }

    #[test]
    fn test_nested_location_and_camel_case_keys() {
        let data = normalize_tracking(&json!({
            "containerNumber": "TGHU1234567",
            "events": [{
                "date": "2024-03-01T10:00:00Z",
                "location": {
                    "name": "Port of Singapore",
                    "country": "SG",
                    "coordinates": { "latitude": "1.2644", "longitude": 103.8222 }
                },
                "event": "Vessel Arrival at Berth",
                "description": "Arrived at Pasir Panjang"
            }],
            "eta": "2024-03-20T00:00:00Z"
        }));
        let latest = &data.locations[0];
        assert_eq!(data.reference, "TGHU1234567");
        assert_eq!(latest.location.name, "Port of Singapore");
        assert_eq!(latest.location.country.as_deref(), Some("SG"));
        assert_eq!(latest.location.coordinates, Some(Coordinates::new(1.2644, 103.8222)));
        assert_eq!(latest.description.as_deref(), Some("Arrived at Pasir Panjang"));
        assert_eq!(data.status, ShipmentStatus::AtPort);
        assert_eq!(data.estimated_arrival.as_deref(), Some("2024-03-20T00:00:00Z"));
    }

    #[test]
    fn test_vessel_mapping() {
        let data = normalize_tracking(&json!({
            "container_number": "MSKU7750050",
            "vessel": {
                "name": "MAERSK ESSEN",
                "imo": 9456783,
                "mmsi": "219018000",
                "current_position": { "lat": "35.1", "lng": "-10.5", "timestamp": "2024-01-20T12:00:00Z" }
            }
        }));
        let vessel = data.vessel.expect("vessel");
        assert_eq!(vessel.name, "MAERSK ESSEN");
        assert_eq!(vessel.imo.as_deref(), Some("9456783"));
        assert_eq!(vessel.mmsi.as_deref(), Some("219018000"));
        let position = vessel.current_position.expect("position");
        assert_eq!((position.lat, position.lng), (35.1, -10.5));
        assert_eq!(position.timestamp, "2024-01-20T12:00:00Z");
    }

    #[test]
    fn test_vessel_without_position_or_name() {
        let data = normalize_tracking(&json!({ "vessel": { "lat": 10.0 } }));
        let vessel = data.vessel.expect("vessel");
        assert_eq!(vessel.name, "Unknown");
        assert!(vessel.current_position.is_none());
    }

    #[test]
    fn test_data_envelope_is_unwrapped() {
        let data = normalize_tracking(&json!({
            "data": { "booking_number": "BK-9", "locations": [{ "event": "Container Loaded" }] }
        }));
        assert_eq!(data.reference, "BK-9");
        assert_eq!(data.status, ShipmentStatus::Loading);
    }

    #[test]
    fn test_normalize_vessel_payloads() {
        let flat = normalize_vessel(&json!({ "name": "MSC OSCAR", "imo": "9703291", "lat": 1.0, "lng": 2.0 }))
            .expect("vessel");
        assert_eq!(flat.name, "MSC OSCAR");
        assert_eq!(flat.current_position.map(|p| p.lat), Some(1.0));

        let nested = normalize_vessel(&json!({ "vessel": { "vesselName": "EVER GIVEN" } })).expect("vessel");
        assert_eq!(nested.name, "EVER GIVEN");

        assert!(normalize_vessel(&json!(null)).is_none());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(&json!("31.2304")), Some(31.2304));
        assert_eq!(parse_coordinate(&json!(31.2304)), Some(31.2304));
        assert_eq!(parse_coordinate(&json!(" -4.5 ")), Some(-4.5));
        assert_eq!(parse_coordinate(&json!("NaN")), None);
        assert_eq!(parse_coordinate(&json!(true)), None);
    }

    #[test]
    fn test_duplicate_spellings_keep_the_record() {
        let data = normalize_tracking(&json!({
            "container_number": "MSKU7750050",
            "containerNumber": "MSKU7750050",
            "locations": [{ "location": "Rotterdam", "event": "Container Discharged" }]
        }));
        assert_eq!(data.reference, "MSKU7750050");
        assert_eq!(data.locations.len(), 1);
        assert_eq!(data.status, ShipmentStatus::Delivered);
    }

    #[test]
    fn test_location_with_two_event_spellings_is_kept() {
        let data = normalize_tracking(&json!({
            "locations": [
                { "event": "Vessel Departure" },
                { "event": "Container Discharged", "event_name": "Discharge" }
            ]
        }));
        assert_eq!(data.locations.len(), 2);
        assert_eq!(data.locations[1].event, "Container Discharged");
        assert_eq!(data.status, ShipmentStatus::Delivered);
    }

    #[test]
    fn test_null_spelling_falls_through_to_the_next() {
        let data = normalize_tracking(&json!({ "containerNumber": null, "container_number": "TGHU1234567" }));
        assert_eq!(data.reference, "TGHU1234567");
    }

    #[test]
    fn test_envelope_keeps_outer_arrival_times() {
        let data = normalize_tracking(&json!({
            "eta": "2026-11-02T08:00:00Z",
            "ata": "2026-11-03T10:00:00Z",
            "data": {
                "container_number": "MSKU7750050",
                "estimated_arrival": "2026-11-01T06:00:00Z"
            }
        }));
        assert_eq!(data.reference, "MSKU7750050");
        assert_eq!(data.estimated_arrival.as_deref(), Some("2026-11-01T06:00:00Z"));
        assert_eq!(data.actual_arrival.as_deref(), Some("2026-11-03T10:00:00Z"));
    }

    #[test]
    fn test_float_identifiers_drop_the_fraction() {
        let vessel = normalize_vessel(&json!({ "name": "MSC OSCAR", "imo": 9456783.0, "mmsi": 477123400 }))
            .expect("vessel");
        assert_eq!(vessel.imo.as_deref(), Some("9456783"));
        assert_eq!(vessel.mmsi.as_deref(), Some("477123400"));

        let odd = normalize_vessel(&json!({ "imo": 12.5 })).expect("vessel");
        assert_eq!(odd.imo.as_deref(), Some("12.5"));
    }
}
