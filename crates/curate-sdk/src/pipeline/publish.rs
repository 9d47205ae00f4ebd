//! Publish flow: upload → create post → register on chain → record status

use super::{settle_submission, Pipeline};
use crate::error::{CollaboratorError, PipelineError};
use curate_client::{CreatePostRequest, PostChainStatus, UpdatePostRequest, UploadPayload};
use serde::{Deserialize, Serialize};

/// A post as submitted by the author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishInput {
    pub title: String,
    pub content: String,
    /// Wallet address of the author
    pub author_identity: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
}

/// Result of a publish that reached a terminal status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// Database identifier, used by callers for navigation
    pub post_record_id: String,
    pub content_ref: String,
    pub transaction_hash: Option<String>,
    pub status: PostChainStatus,
}

impl PublishOutcome {
    /// Whether the chain step failed while the post itself was recorded
    pub fn chain_degraded(&self) -> bool {
        self.status == PostChainStatus::BlockchainFailed
    }
}

impl Pipeline {
    /// Publish a post
    ///
    /// The post record is created before the chain transaction and always
    /// receives a terminal status afterwards, so a chain failure still
    /// resolves successfully with `BLOCKCHAIN_FAILED`.
    pub async fn publish_post(&self, input: PublishInput) -> Result<PublishOutcome, PipelineError> {
        // A: upload
        let payload = UploadPayload {
            title: input.title.clone(),
            content: input.content.clone(),
            author_identity: input.author_identity.clone(),
            tags: input.tags.clone(),
            cover_image: input.cover_image.clone(),
        };

        let content_ref = match self.storage.upload(&payload).await {
            Ok(content_ref) if !content_ref.trim().is_empty() => content_ref,
            Ok(_) => {
                let e = CollaboratorError::rejected("storage returned an empty content reference");
                tracing::error!(error = %e, "content upload failed");
                return Err(PipelineError::UploadFailed(e));
            }
            Err(e) => {
                tracing::error!(error = %e, "content upload failed");
                return Err(PipelineError::UploadFailed(e));
            }
        };
        tracing::info!(%content_ref, "content uploaded");

        // Best-effort ordering hint; concurrent publishers may read the same count
        let sequence_number = match self.chain.post_count().await {
            Ok(count) => Some(count.saturating_add(1)),
            Err(e) => {
                tracing::warn!(error = %e, "could not read post count, omitting sequence number");
                None
            }
        };

        // B: create record
        let create = CreatePostRequest {
            title: input.title,
            content: input.content,
            content_ref: content_ref.clone(),
            author_identity: input.author_identity,
            sequence_number,
        };

        let post_record_id = self.records.create_post(&create).await.map_err(|e| {
            tracing::error!(%content_ref, error = %e, "post record creation failed");
            PipelineError::RecordCreationFailed(e)
        })?;
        tracing::info!(%post_record_id, "post record created");

        // C: chain registration, allowed to fail
        let transaction_hash = settle_submission(
            "register_post",
            self.chain.register_post(&content_ref, &input.tags).await,
        );
        let status = PostChainStatus::from_hash(transaction_hash.as_deref());

        // D: terminal status
        let update = UpdatePostRequest {
            transaction_hash: transaction_hash.clone(),
            status,
        };
        self.update_with_retry(&post_record_id, || {
            self.records.update_post(&post_record_id, &update)
        })
        .await?;

        tracing::info!(%post_record_id, status = status.as_str(), "post published");

        Ok(PublishOutcome {
            post_record_id,
            content_ref,
            transaction_hash,
            status,
        })
    }
}
