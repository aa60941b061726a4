use async_trait::async_trait;
use std::fmt;

use super::fetch::{self, FetchError};
use super::settings::load_settings;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    EmptyPointer,
    Fetch(FetchError),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::EmptyPointer => write!(f, "Metadata pointer is empty"),
            GatewayError::Fetch(e) => write!(f, "Gateway fetch failed: {}", e),
        }
    }
}

impl From<FetchError> for GatewayError {
    fn from(e: FetchError) -> Self {
        GatewayError::Fetch(e)
    }
}

/// Dereferences content pointers (IPFS CIDs) to JSON documents.
#[async_trait(?Send)]
pub trait ContentGateway {
    async fn fetch_json(&self, pointer: &str) -> Result<serde_json::Value, GatewayError>;
}

/// Reads pinned documents through a public IPFS gateway.
#[derive(Debug, Clone)]
pub struct PinataClient {
    gateway: String,
}

impl PinataClient {
    pub fn new() -> Self {
        Self::with_gateway(&load_settings().ipfs_gateway())
    }

    pub fn with_gateway(gateway: &str) -> Self {
        Self {
            gateway: gateway.trim_end_matches('/').to_string(),
        }
    }

    pub fn file_url(&self, pointer: &str) -> String {
        let cid = pointer.trim().trim_start_matches("ipfs://");
        format!("{}/ipfs/{}", self.gateway, cid)
    }
}

impl Default for PinataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ContentGateway for PinataClient {
    async fn fetch_json(&self, pointer: &str) -> Result<serde_json::Value, GatewayError> {
        if pointer.trim().is_empty() {
            return Err(GatewayError::EmptyPointer);
        }
        let url = self.file_url(pointer);
        log::debug!("Fetching {}", url);
        Ok(fetch::get_json(&url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url() {
        let client = PinataClient::with_gateway("https://gateway.pinata.cloud/");
        assert_eq!(
            client.file_url("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
            "https://gateway.pinata.cloud/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
        assert_eq!(
            client.file_url("ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi"),
            "https://gateway.pinata.cloud/ipfs/bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi"
        );
    }
}
