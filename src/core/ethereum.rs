use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

use super::abi;
use super::rpc_base::{JsonRpcTransport, RpcError};

/// Browser wallet exposed as `window.ethereum` (EIP-1193).
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectedProvider;

impl InjectedProvider {
    fn ethereum() -> Result<JsValue, RpcError> {
        let window = window().ok_or(RpcError::ConnectionFailed("No window object".to_string()))?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|e| RpcError::ConnectionFailed(format!("Failed to get ethereum: {:?}", e)))?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return Err(RpcError::ConnectionFailed("No injected wallet found".to_string()));
        }
        Ok(ethereum)
    }

    /// Check if a wallet extension is installed in the browser
    pub fn is_installed() -> bool {
        Self::ethereum().is_ok()
    }

    /// Ask the wallet for access and return the selected account
    pub async fn request_account(&self) -> Result<String, RpcError> {
        let accounts = self.request("eth_requestAccounts", serde_json::json!([])).await?;
        accounts.as_array()
            .and_then(|list| list.first())
            .and_then(|account| account.as_str())
            .map(str::to_string)
            .ok_or_else(|| RpcError::ConnectionFailed("Wallet returned no accounts".to_string()))
    }

    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let chain_id = self.request("eth_chainId", serde_json::json!([])).await?;
        let hex_id = chain_id.as_str()
            .ok_or_else(|| RpcError::InvalidResponse(format!("eth_chainId returned {}", chain_id)))?;
        abi::parse_quantity(hex_id).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl JsonRpcTransport for InjectedProvider {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, RpcError> {
        let ethereum = Self::ethereum()?;

        let request_func = js_sys::Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(|e| RpcError::ConnectionFailed(format!("Failed to get request function: {:?}", e)))?;

        if !request_func.is_function() {
            return Err(RpcError::ConnectionFailed("request is not a function".to_string()));
        }

        let args = JsValue::from_serde(&serde_json::json!({ "method": method, "params": params }))
            .map_err(|e| RpcError::Other(e.to_string()))?;

        let func = js_sys::Function::from(request_func);
        let promise = func.call1(&ethereum, &args)
            .map_err(|e| RpcError::ConnectionFailed(format!("{:?}", e)))?;

        let result = JsFuture::from(Promise::from(promise)).await
            .map_err(provider_error)?;

        if result.is_undefined() {
            return Ok(serde_json::Value::Null);
        }
        result.into_serde()
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }
}

// EIP-1193 rejections carry `{ code, message }`
fn provider_error(error: JsValue) -> RpcError {
    let code = js_sys::Reflect::get(&error, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = js_sys::Reflect::get(&error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string());

    match (code, message) {
        (Some(code), Some(message)) => RpcError::ProviderError { code, message },
        _ => RpcError::ConnectionFailed(format!("{:?}", error)),
    }
}
