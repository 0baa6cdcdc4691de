use std::time::Duration;

use reqwest::{Client as HttpClient, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use super::models::{ApiError, ErrorResponse, ListingsResponse, RawAssetRecord};
use crate::config::Settings;
use tracing::{debug, warn};

/// CoinMarketCap Pro API client for the latest listings snapshot
pub struct CoinMarketCapClient {
    http_client: HttpClient,
    api_key: String,
    listings_url: String,
}

impl CoinMarketCapClient {
    /// First rank to request
    pub const START: u32 = 1;
    /// Page size; only one page is ever requested
    pub const LIMIT: u32 = 50;
    /// Quote currency for every figure in the response
    pub const CONVERT: &'static str = "USD";

    const API_KEY_HEADER: &'static str = "x-cmc_pro_api_key";

    /// Create a client from loaded settings
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        Self::with_base_url(
            settings.api_key.clone(),
            settings.api_url.clone(),
            settings.request_timeout,
        )
    }

    /// Create a client against an explicit listings URL
    pub fn with_base_url(api_key: String, listings_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = Self::http_client_builder(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_http_client(http_client, api_key, listings_url))
    }

    /// Builder with the whole-request timeout applied; a hung endpoint
    /// surfaces as `RequestError` instead of blocking the scheduler
    pub fn http_client_builder(timeout: Duration) -> ClientBuilder {
        HttpClient::builder().timeout(timeout)
    }

    /// Create a client on top of a preconfigured HTTP client (for testing)
    pub fn with_http_client(http_client: HttpClient, api_key: String, listings_url: String) -> Self {
        Self {
            http_client,
            api_key,
            listings_url,
        }
    }

    fn create_headers(&self) -> Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("accepts"),
            HeaderValue::from_static("application/json"),
        );

        let key_value = HeaderValue::from_str(&self.api_key)
            .map_err(|e| format!("Failed to create API key header: {}", e))?;
        headers.insert(HeaderName::from_static(Self::API_KEY_HEADER), key_value);

        Ok(headers)
    }

    /// Prefer `status.error_message` from the JSON envelope over the raw body
    fn error_message(body_text: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body_text)
            .ok()
            .and_then(|err| err.status.error_message)
            .unwrap_or_else(|| body_text.to_string())
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = Self::error_message(&body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            429 => {
                warn!("CoinMarketCap rate limit hit: {}", message);
                ApiError::RateLimited(message)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    /// GET /v1/cryptocurrency/listings/latest
    ///
    /// Fetches one page of the top assets by rank, quoted in USD.
    ///
    /// # Returns
    /// * `Ok(Vec<RawAssetRecord>)` - the `data` array in ranking order
    /// * `Err(ApiError)` - transport failure, non-success status, or bad body
    pub async fn fetch_listings(&self) -> Result<Vec<RawAssetRecord>, ApiError> {
        let headers = self.create_headers()
            .map_err(ApiError::RequestError)?;

        let start = Self::START.to_string();
        let limit = Self::LIMIT.to_string();

        let response = self.http_client
            .get(&self.listings_url)
            .headers(headers)
            .query(&[
                ("start", start.as_str()),
                ("limit", limit.as_str()),
                ("convert", Self::CONVERT),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let listings = response
            .json::<ListingsResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        debug!("Fetched {} listings", listings.data.len());
        Ok(listings.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::coinmarketcap::mock_server::{local_client, local_client_with_timeout, serve_once, stall_once};

    #[tokio::test]
    async fn test_fetch_sends_fixed_query_and_key() {
        let body = r#"{"status":{"error_code":0},"data":[{"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":50000.0}}}]}"#;
        let (url, request) = serve_once("200 OK", body).await;

        let client = local_client("test-key".to_string(), url);
        let records = client.fetch_listings().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol.as_deref(), Some("BTC"));

        let request = request.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /v1/cryptocurrency/listings/latest?"));
        assert!(request.contains("start=1"));
        assert!(request.contains("limit=50"));
        assert!(request.contains("convert=usd"));
        assert!(request.contains("x-cmc_pro_api_key: test-key"));
    }

    #[tokio::test]
    async fn test_unauthorized_uses_status_message() {
        let body = r#"{"status":{"error_code":1001,"error_message":"This API Key is invalid."}}"#;
        let (url, _request) = serve_once("401 Unauthorized", body).await;

        let client = local_client(String::new(), url);
        match client.fetch_listings().await {
            Err(ApiError::Unauthorized(msg)) => assert_eq!(msg, "This API Key is invalid."),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_keeps_raw_body() {
        let (url, _request) = serve_once("503 Service Unavailable", "upstream down").await;

        let client = local_client("k".to_string(), url);
        match client.fetch_listings().await {
            Err(ApiError::ServerError(503, msg)) => assert_eq!(msg, "upstream down"),
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialization_error() {
        let (url, _request) = serve_once("200 OK", "not json").await;

        let client = local_client("k".to_string(), url);
        assert!(matches!(
            client.fetch_listings().await,
            Err(ApiError::DeserializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_stalled_endpoint_times_out() {
        let url = stall_once().await;

        let client = local_client_with_timeout("k".to_string(), url, Duration::from_millis(200));
        let started = std::time::Instant::now();
        let result = client.fetch_listings().await;

        assert!(matches!(result, Err(ApiError::RequestError(_))));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_new_from_settings() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        let client = CoinMarketCapClient::new(&settings).unwrap();
        assert_eq!(client.listings_url, crate::config::DEFAULT_API_URL);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client("k".to_string(), format!("http://{}/", addr));
        assert!(matches!(
            client.fetch_listings().await,
            Err(ApiError::RequestError(_))
        ));
    }
}
