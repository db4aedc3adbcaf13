// Tracking request identification
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackingRequestError {
    #[error("one of containerNumber, bookingNumber or billOfLading is required")]
    MissingIdentifier,
    #[error("only one of containerNumber, bookingNumber or billOfLading may be given")]
    MultipleIdentifiers,
}

/// A shipment lookup, identified by exactly one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingRequest {
    Container(String),
    Booking {
        number: String,
        scac_code: Option<String>,
    },
    BillOfLading(String),
}

impl TrackingRequest {
    pub fn container(number: impl Into<String>) -> Self {
        Self::Container(number.into())
    }

    pub fn booking(number: impl Into<String>, scac_code: Option<String>) -> Self {
        Self::Booking {
            number: number.into(),
            scac_code,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Container(number) => number,
            Self::Booking { number, .. } => number,
            Self::BillOfLading(number) => number,
        }
    }
}

impl fmt::Display for TrackingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(number) => write!(f, "container {}", number),
            Self::Booking {
                number,
                scac_code: Some(scac),
            } => write!(f, "booking {} ({})", number, scac),
            Self::Booking { number, .. } => write!(f, "booking {}", number),
            Self::BillOfLading(number) => write!(f, "bill of lading {}", number),
        }
    }
}

/// Raw request body as sent by the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingQuery {
    #[serde(default)]
    pub container_number: Option<String>,
    #[serde(default)]
    pub booking_number: Option<String>,
    #[serde(default)]
    pub scac_code: Option<String>,
    #[serde(default)]
    pub bill_of_lading: Option<String>,
}

impl TryFrom<TrackingQuery> for TrackingRequest {
    type Error = TrackingRequestError;

    fn try_from(query: TrackingQuery) -> Result<Self, Self::Error> {
        let container = non_blank(query.container_number);
        let booking = non_blank(query.booking_number);
        let bill = non_blank(query.bill_of_lading);

        match (container, booking, bill) {
            (Some(number), None, None) => Ok(Self::container(number)),
            (None, Some(number), None) => Ok(Self::booking(number, non_blank(query.scac_code))),
            (None, None, Some(number)) => Ok(Self::BillOfLading(number)),
            (None, None, None) => Err(TrackingRequestError::MissingIdentifier),
            _ => Err(TrackingRequestError::MultipleIdentifiers),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
