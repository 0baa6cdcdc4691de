use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Envelope returned by GET /v1/cryptocurrency/listings/latest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub data: Vec<RawAssetRecord>,
    #[serde(default)]
    pub status: Option<ResponseStatus>,
}

/// One asset as ranked by the listings endpoint.
///
/// Every field is optional: absent and `null` both decode to `None`
/// so a sparse record never fails the whole response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAssetRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub cmc_rank: Option<u32>,
    /// Quotes keyed by convert currency code ("USD")
    #[serde(default)]
    pub quote: Option<HashMap<String, RawQuote>>,
}

/// Market figures for one asset in one convert currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQuote {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub percent_change_24h: Option<f64>,
}

/// `status` block present on both success and error bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Error body shape, used only to pull out `status.error_message`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized (missing or invalid API key)
    Unauthorized(String),
    /// 403 Forbidden (plan does not cover the endpoint)
    Forbidden(String),
    /// 429 Too Many Requests
    RateLimited(String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
