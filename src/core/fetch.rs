use gloo_utils::format::JsValueSerdeExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use std::fmt;

// error type shared by every HTTP-backed client
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Request(String),
    Status(u16, String),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(msg) => write!(f, "Request failed: {}", msg),
            FetchError::Status(code, text) => write!(f, "HTTP {} {}", code, text),
            FetchError::Decode(msg) => write!(f, "Invalid JSON response: {}", msg),
        }
    }
}

/// GET a JSON document.
pub async fn get_json(url: &str) -> Result<serde_json::Value, FetchError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FetchError::Request(format!("Failed to create request: {:?}", e)))?;

    send(request).await
}

/// POST a JSON body and read a JSON response.
pub async fn post_json(url: &str, body: &serde_json::Value) -> Result<serde_json::Value, FetchError> {
    let request_body = serde_json::to_string(body)
        .map_err(|e| FetchError::Request(format!("Failed to serialize body: {}", e)))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&request_body));

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FetchError::Request(format!("Failed to create request: {:?}", e)))?;

    request.headers().set("Content-Type", "application/json")
        .map_err(|e| FetchError::Request(format!("Failed to set headers: {:?}", e)))?;

    send(request).await
}

async fn send(request: Request) -> Result<serde_json::Value, FetchError> {
    let window = web_sys::window()
        .ok_or_else(|| FetchError::Request("No window object".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| {
            log::error!("HTTP request to {} failed: {:?}", request.url(), e);
            FetchError::Request(format!("{:?}", e))
        })?;

    let resp: Response = resp_value.dyn_into()
        .map_err(|e| FetchError::Request(format!("Failed to convert response: {:?}", e)))?;

    if !resp.ok() {
        log::error!("HTTP error: url={}, status={}, status_text={}", resp.url(), resp.status(), resp.status_text());
        return Err(FetchError::Status(resp.status(), resp.status_text()));
    }

    let json = JsFuture::from(resp.json().map_err(|e| FetchError::Decode(format!("{:?}", e)))?)
        .await
        .map_err(|e| FetchError::Decode(format!("{:?}", e)))?;

    json.into_serde()
        .map_err(|e| FetchError::Decode(e.to_string()))
}
