use std::env;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::presentation::ports::{AnnualDataSource, FetchError};

pub const ANNUAL_DATA_PATH: &str = "/api/get_annual_data";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4399";
pub const REQUEST_FAILED_FALLBACK: &str = "请求失败，请稍后重试";

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub endpoint: String,
}

impl FetchConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANNUAL_DATA_PATH),
        }
    }

    /// `ANNUAL_DATA_BASE_URL`, falling back to the local server.
    pub fn from_env() -> Self {
        let base_url = env::var("ANNUAL_DATA_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url.trim())
    }
}

#[derive(Serialize)]
struct AnnualDataRequest<'a> {
    name: &'a str,
    phone: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpAnnualDataSource {
    http: reqwest::Client,
    config: FetchConfig,
}

impl HttpAnnualDataSource {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: FetchConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }
}

/// Server-supplied failure text: `message`, then `error.message`, then a
/// plain string `error`.
pub fn extract_message(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
}

/// Decodes a response body. A non-JSON or empty body reads as `{}`; a
/// non-success status becomes `RequestFailed`.
pub fn decode_response(ok: bool, body: &[u8]) -> Result<Value, FetchError> {
    let json: Value =
        serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()));

    if !ok {
        let message = extract_message(&json).unwrap_or(REQUEST_FAILED_FALLBACK);
        return Err(FetchError::RequestFailed(message.to_string()));
    }
    Ok(json)
}

#[async_trait]
impl AnnualDataSource for HttpAnnualDataSource {
    async fn fetch_annual_data(&self, name: &str, phone: &str) -> Result<Value, FetchError> {
        let body = serde_json::to_vec(&AnnualDataRequest { name, phone })
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, endpoint = %self.config.endpoint, "Annual data request failed");
                FetchError::Network(e.to_string())
            })?;

        let ok = response.status().is_success();
        // an unreadable body is treated like an empty one
        let bytes = response.bytes().await.unwrap_or_default();

        decode_response(ok, &bytes)
    }
}
