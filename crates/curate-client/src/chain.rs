//! JSON-RPC client for the CurateAi contract relay
//!
//! The relay holds the wallet and submits transactions on the caller's
//! behalf. Submission methods return the relay's raw `result` value: some
//! relays answer with a bare hash string, others with a receipt object
//! carrying a `hash` field. Interpreting that value is left to the caller.

use crate::error::{ClientError, Result};
use crate::http::{build_client, handle_response};
use crate::types::{ChainConfig, EndpointConfig, JsonRpcRequest, JsonRpcResponse};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

const METHOD_POST_COUNT: &str = "curate_postCount";
const METHOD_REGISTER_POST: &str = "curate_registerPost";
const METHOD_VOTE: &str = "curate_vote";

/// JSON-RPC client for contract reads and transaction submission
pub struct ChainClient {
    config: ChainConfig,
    client: Client,
    next_id: AtomicU64,
}

impl ChainClient {
    /// Create a new chain client
    pub fn new(config: ChainConfig) -> Result<Self> {
        let client = build_client(&EndpointConfig {
            base_url: config.rpc_url.clone(),
            api_key: None,
            timeout_secs: config.timeout_secs,
        })?;

        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Number of posts registered on the contract
    pub async fn post_count(&self) -> Result<u64> {
        let result = self
            .call(METHOD_POST_COUNT, vec![json!(self.config.contract_address)])
            .await?;
        parse_count(&result)
    }

    /// Submit a post registration; returns the relay's raw result
    pub async fn register_post(&self, content_ref: &str, tags: &[String]) -> Result<Value> {
        self.call(
            METHOD_REGISTER_POST,
            vec![
                json!(self.config.contract_address),
                json!(content_ref),
                json!(tags),
            ],
        )
        .await
    }

    /// Submit a vote; returns the relay's raw result
    pub async fn vote(&self, post_internal_id: u64, quantity: u64) -> Result<Value> {
        self.call(
            METHOD_VOTE,
            vec![
                json!(self.config.contract_address),
                json!(post_internal_id),
                json!(quantity),
            ],
        )
        .await
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await?;
        let body: JsonRpcResponse = handle_response(response).await?;

        if let Some(err) = body.error {
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        body.result
            .ok_or_else(|| ClientError::InvalidResponse(format!("{} returned no result", method)))
    }
}

/// Accept a count as a JSON number, decimal string, or 0x-prefixed hex string
fn parse_count(value: &Value) -> Result<u64> {
    let invalid = || ClientError::InvalidResponse(format!("unexpected post count: {}", value));

    match value {
        Value::Number(n) => n.as_u64().ok_or_else(invalid),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| invalid()),
            None => s.parse().map_err(|_| invalid()),
        },
        _ => Err(invalid()),
    }
}
