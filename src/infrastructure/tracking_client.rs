// Tracking provider HTTP client
use crate::application::tracking_provider::TrackingProvider;
use crate::domain::request::TrackingRequest;
use crate::infrastructure::config::TrackingSettings;
use async_trait::async_trait;
use reqwest::{header, Method};
use serde_json::{json, Value};

/// Longest slice of an error body written to the logs.
const LOGGED_BODY_LIMIT: usize = 512;

#[derive(Clone)]
pub struct TrackingApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TrackingApiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_settings(settings: &TrackingSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.api_key.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Call the provider and return the JSON body of a 2xx response.
    ///
    /// Transport failures, non-2xx statuses and unparseable bodies are logged and yield `None`.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Option<Value> {
        let url = self.endpoint(path);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!("Calling tracking provider: {} {}", method, url);
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Tracking provider request {} {} failed: {}", method, url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Tracking provider {} {} returned status {}: {}",
                method,
                url,
                status,
                body_excerpt(&body, LOGGED_BODY_LIMIT)
            );
            return None;
        }

        match response.json::<Value>().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse tracking provider response from {}: {}", url, e);
                None
            }
        }
    }
}

/// Cut a response body down to `limit` characters for logging.
fn body_excerpt(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((end, _)) => format!("{}... ({} bytes total)", &body[..end], body.len()),
        None => body.to_string(),
    }
}

/// Request body for `POST /track`.
pub fn track_body(request: &TrackingRequest) -> Value {
    match request {
        TrackingRequest::Container(number) => json!({ "container_number": number }),
        TrackingRequest::Booking {
            number,
            scac_code: Some(scac),
        } => json!({ "booking_number": number, "scac_code": scac }),
        TrackingRequest::Booking { number, .. } => json!({ "booking_number": number }),
        TrackingRequest::BillOfLading(number) => json!({ "bill_of_lading": number }),
    }
}

#[async_trait]
impl TrackingProvider for TrackingApiClient {
    async fn track(&self, request: &TrackingRequest) -> Option<Value> {
        let body = track_body(request);
        self.request(Method::POST, "/track", Some(&body)).await
    }

    async fn vessel(&self, imo: &str) -> Option<Value> {
        let path = format!("/vessel/{}", urlencoding::encode(imo));
        self.request(Method::GET, &path, None).await
    }
}
