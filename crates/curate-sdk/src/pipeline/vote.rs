//! Vote flow: create score → submit vote on chain → record status

use super::{settle_submission, Pipeline};
use crate::error::PipelineError;
use curate_client::{CreateScoreRequest, ScoreChainStatus, UpdateScoreRequest};
use serde::{Deserialize, Serialize};

/// A vote on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteInput {
    /// Database identifier of the post
    pub post_record_id: String,
    /// On-chain identifier of the post
    pub post_internal_id: u64,
    /// Wallet address of the voter
    pub voter_identity: String,
    /// Reputation tokens committed to the vote
    pub quantity: u64,
    /// Share of the voter's balance this vote represents (0-100)
    pub vote_percentage: f64,
}

/// Result of a vote that reached a terminal status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub score_record_id: String,
    pub status: ScoreChainStatus,
    pub transaction_hash: Option<String>,
}

impl VoteOutcome {
    pub fn chain_degraded(&self) -> bool {
        self.status == ScoreChainStatus::BlockchainFailed
    }
}

impl Pipeline {
    /// Submit a vote
    ///
    /// Same shape as [`Pipeline::publish_post`] without the upload step.
    pub async fn submit_vote(&self, input: VoteInput) -> Result<VoteOutcome, PipelineError> {
        // B: create record
        let create = CreateScoreRequest {
            post_record_id: input.post_record_id.clone(),
            voter_identity: input.voter_identity.clone(),
            quantity: input.quantity,
            vote_percentage: input.vote_percentage,
        };

        let score_record_id = self.records.create_score(&create).await.map_err(|e| {
            tracing::error!(post_record_id = %input.post_record_id, error = %e, "score record creation failed");
            PipelineError::RecordCreationFailed(e)
        })?;
        tracing::info!(%score_record_id, post_record_id = %input.post_record_id, "score record created");

        // C: chain vote, allowed to fail
        let transaction_hash = settle_submission(
            "vote",
            self.chain.vote(input.post_internal_id, input.quantity).await,
        );
        let status = ScoreChainStatus::from_hash(transaction_hash.as_deref());

        // D: terminal status
        let update = UpdateScoreRequest {
            tx_hash: transaction_hash.clone(),
            status,
        };
        self.update_with_retry(&score_record_id, || {
            self.records.update_score(&score_record_id, &update)
        })
        .await?;

        tracing::info!(%score_record_id, status = status.as_str(), "vote recorded");

        Ok(VoteOutcome {
            score_record_id,
            status,
            transaction_hash,
        })
    }
}
