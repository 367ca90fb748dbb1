//! Minimal JSON-RPC over HTTP.

use crate::error::RpcError;
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

/// JSON-RPC method used to probe a node.
pub const SYNCING_METHOD: &str = "eth_syncing";

/// A parameterless JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRpcRequest {
    pub method: String,
    pub id: u32,
    pub jsonrpc: &'static str,
}

impl JsonRpcRequest {
    /// A request for `method` with a random id.
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), id: rand::random(), jsonrpc: "2.0" }
    }
}

/// Sends JSON-RPC requests.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// POST `request` to `url` and decode the response body as JSON.
    async fn call(&self, url: &Url, request: &JsonRpcRequest) -> Result<Value, RpcError>;
}

/// [`RpcTransport`] over plain HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, url: &Url, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        let response = self.client.post(url.clone()).json(request).send().await?;
        Ok(response.json::<Value>().await?)
    }
}
