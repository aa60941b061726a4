use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use std::cell::Cell;
use std::fmt;

use super::events::{LogFilter, RawLog};
use super::fetch::{self, FetchError};
use super::network_config;
use super::settings::load_settings;

// error type
#[derive(Debug, Clone, PartialEq)]
pub enum RpcError {
    ConnectionFailed(String),
    ProviderError { code: i64, message: String },
    InvalidResponse(String),
    UnsupportedChain(u64),
    Other(String),
}

// implement the display for the rpc error
impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RpcError::ProviderError { code, message } => write!(f, "RPC error {}: {}", code, message),
            RpcError::InvalidResponse(msg) => write!(f, "Invalid RPC response: {}", msg),
            RpcError::UnsupportedChain(chain_id) => write!(f, "Unsupported chain: {}", chain_id),
            RpcError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl From<FetchError> for RpcError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Decode(msg) => RpcError::InvalidResponse(msg),
            other => RpcError::ConnectionFailed(other.to_string()),
        }
    }
}

/// Anything that can carry a raw JSON-RPC request: an HTTP endpoint or the
/// wallet-injected provider.
#[async_trait(?Send)]
pub trait JsonRpcTransport {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, RpcError>;
}

/// The chain reads the application needs.
#[async_trait(?Send)]
pub trait ChainProvider {
    /// `eth_getLogs`
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, RpcError>;

    /// `eth_call` against the latest block, returning the hex return data.
    async fn call(&self, to: &str, data: &str) -> Result<String, RpcError>;
}

#[async_trait(?Send)]
impl<T: JsonRpcTransport> ChainProvider for T {
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, RpcError> {
        let params = serde_json::json!([filter]);
        let result = self.request("eth_getLogs", params).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::InvalidResponse(format!("eth_getLogs: {}", e)))
    }

    async fn call(&self, to: &str, data: &str) -> Result<String, RpcError> {
        let params = serde_json::json!([{ "to": to, "data": data }, "latest"]);
        let result = self.request("eth_call", params).await?;
        result.as_str()
            .map(str::to_string)
            .ok_or_else(|| RpcError::InvalidResponse(format!("eth_call returned {}", result)))
    }
}

// define the rpc response error structure
#[derive(Deserialize, Debug)]
struct RpcResponseError {
    code: i64,
    message: String,
}

#[derive(Serialize)]
struct RpcRequest<'a, T> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: T,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcResponseError>,
}

/// Plain HTTP JSON-RPC connection.
pub struct RpcConnection {
    endpoint: String,
    next_id: Cell<u64>,
}

impl RpcConnection {
    /// Connection for a chain, honouring a custom endpoint from the user settings.
    pub fn for_chain(chain_id: u64) -> Result<Self, RpcError> {
        if let Some(custom_endpoint) = load_settings().custom_rpc_endpoint() {
            log::debug!("Using custom RPC endpoint from settings: {}", custom_endpoint);
            return Ok(Self::with_endpoint(&custom_endpoint));
        }

        let config = network_config::chain_config(chain_id)
            .ok_or(RpcError::UnsupportedChain(chain_id))?;
        log::debug!("Selected RPC endpoint for {}: {}", config.name, config.rpc_endpoint);
        Ok(Self::with_endpoint(config.rpc_endpoint))
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            next_id: Cell::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn generate_request_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        id
    }
}

#[async_trait(?Send)]
impl JsonRpcTransport for RpcConnection {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.generate_request_id(),
            method,
            params,
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| RpcError::Other(e.to_string()))?;

        log::debug!("RPC request {} to {}", method, self.endpoint);
        let value = fetch::post_json(&self.endpoint, &body).await?;
        parse_response(method, value)
    }
}

fn parse_response(method: &str, value: serde_json::Value) -> Result<serde_json::Value, RpcError> {
    let response: RpcResponse = serde_json::from_value(value)
        .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

    if let Some(error) = response.error {
        log::error!("RPC error for {}: {} {}", method, error.code, error.message);
        return Err(RpcError::ProviderError { code: error.code, message: error.message });
    }

    response.result
        .ok_or_else(|| RpcError::InvalidResponse("Response missing result field".to_string()))
}
