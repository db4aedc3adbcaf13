// Demo tracking records served when live data is unavailable
use crate::domain::tracking::{
    Coordinates, Place, TrackingData, TrackingLocation, VesselInfo, VesselPosition,
};

fn stop(
    timestamp: &str,
    name: &str,
    city: &str,
    country: &str,
    (lat, lng): (f64, f64),
    event: &str,
    description: &str,
) -> TrackingLocation {
    TrackingLocation {
        timestamp: timestamp.to_string(),
        location: Place {
            name: name.to_string(),
            city: Some(city.to_string()),
            country: Some(country.to_string()),
            coordinates: Some(Coordinates::new(lat, lng)),
        },
        event: event.to_string(),
        description: Some(description.to_string()),
    }
}

fn vessel(name: &str, imo: &str, mmsi: &str, (lat, lng): (f64, f64), as_of: &str) -> VesselInfo {
    VesselInfo {
        name: name.to_string(),
        imo: Some(imo.to_string()),
        mmsi: Some(mmsi.to_string()),
        current_position: Some(VesselPosition {
            lat,
            lng,
            timestamp: as_of.to_string(),
        }),
    }
}

/// Two fixed shipments on different carriers and trade lanes.
///
/// Only the vessel position timestamp depends on the clock.
pub fn demo_tracking_data() -> Vec<TrackingData> {
    let now = chrono::Utc::now().to_rfc3339();

    let asia_europe = TrackingData::new(
        Some("MSKU7750050".to_string()),
        Some("MAEU240011".to_string()),
        Some("MAEU240011884".to_string()),
        vec![
            stop(
                "2024-01-05T08:30:00Z",
                "Yangshan Deep Water Port",
                "Shanghai",
                "China",
                (30.6266, 122.0653),
                "Gate In",
                "Full container received at terminal",
            ),
            stop(
                "2024-01-07T14:10:00Z",
                "Yangshan Deep Water Port",
                "Shanghai",
                "China",
                (30.6266, 122.0653),
                "Container Loaded",
                "Loaded on vessel MAERSK ESSEN",
            ),
            stop(
                "2024-01-08T02:45:00Z",
                "Yangshan Deep Water Port",
                "Shanghai",
                "China",
                (30.6266, 122.0653),
                "Vessel Departure",
                "Vessel left port of loading",
            ),
            stop(
                "2024-01-19T11:00:00Z",
                "Strait of Malacca",
                "Singapore",
                "Singapore",
                (1.4300, 102.8900),
                "In Transit",
                "Vessel en route to Rotterdam",
            ),
        ],
        Some(vessel(
            "MAERSK ESSEN",
            "9456783",
            "219018000",
            (1.4300, 102.8900),
            &now,
        )),
    )
    .with_arrivals(Some("2024-02-12T06:00:00Z".to_string()), None);

    let transpacific = TrackingData::new(
        Some("MSCU4829173".to_string()),
        Some("MSCBK7731205".to_string()),
        None,
        vec![
            stop(
                "2024-01-10T09:00:00Z",
                "Pasir Panjang Terminal",
                "Singapore",
                "Singapore",
                (1.2644, 103.7570),
                "Gate In",
                "Full container received at terminal",
            ),
            stop(
                "2024-01-11T16:20:00Z",
                "Pasir Panjang Terminal",
                "Singapore",
                "Singapore",
                (1.2644, 103.7570),
                "Container Loaded",
                "Loaded on vessel MSC GULSUN",
            ),
            stop(
                "2024-01-12T04:05:00Z",
                "Pasir Panjang Terminal",
                "Singapore",
                "Singapore",
                (1.2644, 103.7570),
                "Vessel Departure",
                "Vessel left port of loading",
            ),
            stop(
                "2024-01-18T13:40:00Z",
                "Busan New Port",
                "Busan",
                "South Korea",
                (35.0746, 128.8270),
                "Transshipment",
                "Container moved to connecting service for Los Angeles",
            ),
        ],
        Some(vessel(
            "MSC GULSUN",
            "9839430",
            "636019065",
            (38.2100, 152.4400),
            &now,
        )),
    )
    .with_arrivals(Some("2024-02-02T15:00:00Z".to_string()), None);

    vec![asia_europe, transpacific]
}
