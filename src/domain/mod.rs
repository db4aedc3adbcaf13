// Domain layer - Tracking models and pure business rules
pub mod request;
pub mod status;
pub mod tracking;
