//! Minimal JSON-RPC 2.0 transport over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use insight_core::constants::DEFAULT_RPC_TIMEOUT_SECS;
use insight_core::error::{InsightError, Result};

/// Connection settings for one chain node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl RpcConfig {
    /// Creates a configuration with the given URL and the default timeout.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            timeout_seconds: DEFAULT_RPC_TIMEOUT_SECS,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Shared HTTP transport used by the chain clients.
pub(crate) struct JsonRpcClient {
    url: Url,
    http_client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub(crate) fn new(config: &RpcConfig) -> Result<Self> {
        let url = Url::parse(&config.rpc_url).map_err(|e| {
            InsightError::ConfigError(format!("invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InsightError::HttpError(e.to_string()))?;

        Ok(Self {
            url,
            http_client,
            next_id: AtomicU64::new(1),
        })
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    /// Performs one call and returns its `result`, mapping every failure mode
    /// (transport, HTTP status, RPC error object, missing result) to an error.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });

        debug!(method, id, "JSON-RPC request");

        let response = self
            .http_client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(method, e))?
            .error_for_status()
            .map_err(|e| transport_error(method, e))?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| InsightError::malformed(method, e.to_string()))?;

        if let Some(error) = body.error {
            warn!(method, code = error.code, message = %error.message, "JSON-RPC error");
            return Err(InsightError::rpc(
                method,
                format!("{} (code {})", error.message, error.code),
            ));
        }

        body.result
            .ok_or_else(|| InsightError::malformed(method, "response has neither result nor error"))
    }
}

fn transport_error(method: &str, err: reqwest::Error) -> InsightError {
    if err.is_timeout() {
        InsightError::ConnectionTimeout(format!("{}: {}", method, err))
    } else {
        InsightError::HttpError(format!("{}: {}", method, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_invalid_url_rejected() {
        let err = JsonRpcClient::new(&RpcConfig::new("not a url")).err().unwrap();
        assert!(matches!(err, InsightError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_call_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"jsonrpc": "2.0", "method": "net_version"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1, "result": "1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JsonRpcClient::new(&RpcConfig::new(server.uri())).unwrap();
        let version: String = client.call("net_version", json!([])).await.unwrap();
        assert_eq!(version, "1");
    }

    #[tokio::test]
    async fn test_error_object_is_recoverable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1,
                "error": {"code": -32000, "message": "header not found"}
            })))
            .mount(&server)
            .await;

        let client = JsonRpcClient::new(&RpcConfig::new(server.uri())).unwrap();
        let err = client.call::<String>("eth_getBalance", json!([])).await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("header not found"));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = JsonRpcClient::new(&RpcConfig::new(server.uri())).unwrap();
        let err = client.call::<String>("eth_getBalance", json!([])).await.unwrap_err();
        assert!(matches!(err, InsightError::HttpError(_)));
    }

    #[tokio::test]
    async fn test_missing_result_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1, "result": null
            })))
            .mount(&server)
            .await;

        let client = JsonRpcClient::new(&RpcConfig::new(server.uri())).unwrap();
        let err = client.call::<String>("eth_getBalance", json!([])).await.unwrap_err();
        assert!(matches!(err, InsightError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = JsonRpcClient::new(&RpcConfig::new(server.uri()).with_timeout(1)).unwrap();
        let err = client.call::<String>("eth_getBalance", json!([])).await.unwrap_err();
        assert!(matches!(err, InsightError::ConnectionTimeout(_)));
    }
}
