//! Types for the service client APIs

use serde::{Deserialize, Serialize};

/// Connection settings shared by the backend and pinning clients
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Base URL for the HTTP API
    pub base_url: String,
    /// Optional API key, sent as a bearer token
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Connection settings for the chain JSON-RPC relay
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Address of the CurateAi contract
    pub contract_address: String,
    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: String::new(),
            timeout_secs: 60,
        }
    }
}

// ==================== Chain status ====================

/// Terminal chain status recorded on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostChainStatus {
    /// Registration transaction was submitted and a hash obtained
    BlockchainInitiated,
    /// Registration transaction failed or returned no hash
    BlockchainFailed,
}

impl PostChainStatus {
    /// Status for a registration that did or did not yield a hash
    pub fn from_hash(hash: Option<&str>) -> Self {
        match hash {
            Some(_) => Self::BlockchainInitiated,
            None => Self::BlockchainFailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlockchainInitiated => "BLOCKCHAIN_INITIATED",
            Self::BlockchainFailed => "BLOCKCHAIN_FAILED",
        }
    }
}

/// Terminal chain status recorded on a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreChainStatus {
    /// Vote transaction was submitted and a hash obtained
    Verified,
    /// Vote transaction failed or returned no hash
    BlockchainFailed,
}

impl ScoreChainStatus {
    /// Status for a vote that did or did not yield a hash
    pub fn from_hash(hash: Option<&str>) -> Self {
        match hash {
            Some(_) => Self::Verified,
            None => Self::BlockchainFailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::BlockchainFailed => "BLOCKCHAIN_FAILED",
        }
    }
}

// ==================== Backend: posts ====================

/// Request body for creating a post record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    /// CID returned by the pinning service
    pub content_ref: String,
    /// Wallet address of the author
    pub author_identity: String,
    /// Best-effort ordering hint (on-chain post count + 1); not unique
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
}

/// Request body for recording the chain outcome on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    pub status: PostChainStatus,
}

/// Record returned by create endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    /// Database identifier
    #[serde(alias = "_id")]
    pub id: String,
}

// ==================== Backend: scores ====================

/// Request body for creating a score (vote) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    pub post_record_id: String,
    /// Wallet address of the voter
    pub voter_identity: String,
    /// Number of reputation tokens committed
    pub quantity: u64,
    /// Share of the voter's balance this vote represents (0-100)
    pub vote_percentage: f64,
}

/// Request body for recording the chain outcome on a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub status: ScoreChainStatus,
}

// ==================== Backend: claps ====================

/// Request body for adding a batch of claps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddClapsRequest {
    pub count: u32,
}

/// Server-confirmed clap counts for one post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClapCounts {
    /// Claps attributed to the requesting user
    #[serde(default)]
    pub user_claps: u64,
    /// Claps from all users
    #[serde(default)]
    pub total_claps: u64,
}

// ==================== Pinning service ====================

/// Post payload pinned to IPFS/Filecoin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub title: String,
    pub content: String,
    pub author_identity: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Response from the pinning service upload endpoint
///
/// Pinning services name the field differently; some send more than one.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub cid: Option<String>,
    #[serde(default, rename = "contentRef")]
    pub content_ref: Option<String>,
    #[serde(default, rename = "Hash")]
    pub hash: Option<String>,
}

impl UploadResponse {
    /// First non-empty reference, in `cid`, `contentRef`, `Hash` order
    pub fn into_cid(self) -> Option<String> {
        [self.cid, self.content_ref, self.hash]
            .into_iter()
            .flatten()
            .find(|c| !c.trim().is_empty())
    }
}

// ==================== JSON-RPC ====================

/// JSON-RPC request envelope
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<serde_json::Value>,
}

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error member
#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcError {
    pub code: i64,
    pub message: String,
}
