// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod provider_payload;
pub mod tracking_client;
