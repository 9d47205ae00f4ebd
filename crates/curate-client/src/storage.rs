//! HTTP client for the IPFS/Filecoin pinning service

use crate::error::{ClientError, Result};
use crate::http::{build_client, handle_response, join};
use crate::types::{EndpointConfig, UploadPayload, UploadResponse};
use cid::Cid;
use reqwest::Client;

/// Client for pinning post payloads to content-addressed storage
pub struct StorageClient {
    config: EndpointConfig,
    client: Client,
}

impl StorageClient {
    /// Create a new pinning client
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    /// Pin a payload and return its CID
    ///
    /// A response without a parseable CID is an error; an empty reference is
    /// never returned.
    pub async fn upload(&self, payload: &UploadPayload) -> Result<String> {
        let url = join(&self.config.base_url, "upload");

        let response = self.client.post(&url).json(payload).send().await?;
        let body: UploadResponse = handle_response(response).await?;

        let raw = body
            .into_cid()
            .ok_or_else(|| ClientError::InvalidResponse("upload returned no CID".into()))?;

        let cid = parse_cid(raw.trim())?;
        tracing::debug!(%cid, "pinned post payload");
        Ok(cid.to_string())
    }
}

/// Validate a CID string (v0 or v1)
pub fn parse_cid(raw: &str) -> Result<Cid> {
    Cid::try_from(raw)
        .map_err(|e| ClientError::InvalidResponse(format!("invalid CID '{}': {}", raw, e)))
}
