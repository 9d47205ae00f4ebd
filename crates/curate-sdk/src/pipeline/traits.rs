//! Collaborator seams for the pipeline and clap sessions
//!
//! Each external system sits behind a trait so the pipeline can be driven by
//! the HTTP clients in production and by in-memory mocks in tests.

use crate::error::CollaboratorError;
use async_trait::async_trait;
use curate_client::{
    CreatePostRequest, CreateScoreRequest, UpdatePostRequest, UpdateScoreRequest, UploadPayload,
};
use serde_json::Value;

/// Content-addressed storage (IPFS/Filecoin)
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a post payload and return its content reference
    ///
    /// Implementations must fail rather than return an empty reference.
    async fn upload(&self, payload: &UploadPayload) -> Result<String, CollaboratorError>;
}

/// Off-chain database of post and score records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a post record, returning its identifier
    async fn create_post(&self, input: &CreatePostRequest) -> Result<String, CollaboratorError>;

    async fn update_post(
        &self,
        post_record_id: &str,
        update: &UpdatePostRequest,
    ) -> Result<(), CollaboratorError>;

    /// Create a score record, returning its identifier
    async fn create_score(&self, input: &CreateScoreRequest) -> Result<String, CollaboratorError>;

    async fn update_score(
        &self,
        score_record_id: &str,
        update: &UpdateScoreRequest,
    ) -> Result<(), CollaboratorError>;
}

/// Blockchain wallet/RPC provider
///
/// Submission methods return whatever the provider resolved with; see
/// [`normalize_tx_hash`](super::normalize_tx_hash).
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Number of posts registered on chain
    async fn post_count(&self) -> Result<u64, CollaboratorError>;

    async fn register_post(
        &self,
        content_ref: &str,
        tags: &[String],
    ) -> Result<Value, CollaboratorError>;

    async fn vote(&self, post_internal_id: u64, quantity: u64) -> Result<Value, CollaboratorError>;
}

/// Backend endpoint receiving clap batches
#[async_trait]
pub trait ClapSink: Send + Sync {
    async fn add_claps(&self, post_id: &str, count: u32) -> Result<(), CollaboratorError>;
}
