// Application layer - Tracking use cases and provider seam
pub mod demo_data;
pub mod tracking_provider;
pub mod tracking_service;
