//! User-facing outcome notices
//!
//! Fatal pipeline errors get one generic notice; the detail goes to the log.
//! A degraded chain step gets a softer notice, since the post or vote itself
//! was recorded.

use crate::error::PipelineError;
use crate::pipeline::{PublishOutcome, VoteOutcome};

/// Notice to show the user after an action settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Published { post_record_id: String },
    PublishedChainDegraded { post_record_id: String },
    Voted { score_record_id: String },
    VotedChainDegraded { score_record_id: String },
    PublishFailed,
    VoteFailed,
    ClapFailed { post_id: String },
}

impl Notice {
    pub fn for_publish(result: &Result<PublishOutcome, PipelineError>) -> Self {
        match result {
            Ok(outcome) if outcome.chain_degraded() => Self::PublishedChainDegraded {
                post_record_id: outcome.post_record_id.clone(),
            },
            Ok(outcome) => Self::Published {
                post_record_id: outcome.post_record_id.clone(),
            },
            Err(_) => Self::PublishFailed,
        }
    }

    pub fn for_vote(result: &Result<VoteOutcome, PipelineError>) -> Self {
        match result {
            Ok(outcome) if outcome.chain_degraded() => Self::VotedChainDegraded {
                score_record_id: outcome.score_record_id.clone(),
            },
            Ok(outcome) => Self::Voted {
                score_record_id: outcome.score_record_id.clone(),
            },
            Err(_) => Self::VoteFailed,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Published { .. } => "Post published.",
            Self::PublishedChainDegraded { .. } => {
                "Post published, but the blockchain transaction failed."
            }
            Self::Voted { .. } => "Vote recorded.",
            Self::VotedChainDegraded { .. } => {
                "Vote recorded, but the blockchain transaction failed."
            }
            Self::PublishFailed => "Failed to publish post. Please try again.",
            Self::VoteFailed => "Failed to submit vote. Please try again.",
            Self::ClapFailed { .. } => "Failed to save your claps. Please try again.",
        }
    }

    /// Whether the user's action did not go through
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::PublishFailed | Self::VoteFailed | Self::ClapFailed { .. }
        )
    }
}
