use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Non-success status; carries the server message or a generic fallback.
    #[error("{0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// One best-effort lookup of a person's annual record. No retry, timeout or
/// cache: the caller decides what to do with a failure.
#[async_trait]
pub trait AnnualDataSource: Send + Sync {
    async fn fetch_annual_data(&self, name: &str, phone: &str) -> Result<Value, FetchError>;
}
