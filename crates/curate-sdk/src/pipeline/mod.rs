//! Publish/vote pipeline
//!
//! Writes one user action to three independent systems in a fixed order:
//!
//! ```text
//! A. upload   (content-addressed storage)   publish only
//! B. create   (database record)
//! C. submit   (blockchain transaction)      failure degrades, never aborts
//! D. update   (database record status)      always runs once B succeeded
//! ```
//!
//! A and B failures abort before anything else is touched. C is caught and
//! recorded as a `BLOCKCHAIN_FAILED` status. D is retried per
//! [`PipelineConfig::record_update_attempts`] and surfaces as
//! [`PipelineError::RecordUpdateFailed`] when it keeps failing.

mod publish;
mod traits;
mod tx;
mod vote;

pub use publish::{PublishInput, PublishOutcome};
pub use traits::{ChainGateway, ClapSink, ContentStore, RecordStore};
pub use tx::normalize_tx_hash;
pub use vote::{VoteInput, VoteOutcome};

use crate::error::{CollaboratorError, PipelineError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Tries for the final status update (step D); at least 1
    pub record_update_attempts: u32,
    /// Pause between status update tries
    pub retry_backoff: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            record_update_attempts: 1,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Publish/vote orchestrator
///
/// Collaborators are injected at construction; the pipeline holds no global
/// state and can be built per test or per request scope.
pub struct Pipeline {
    storage: Arc<dyn ContentStore>,
    records: Arc<dyn RecordStore>,
    chain: Arc<dyn ChainGateway>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        storage: Arc<dyn ContentStore>,
        records: Arc<dyn RecordStore>,
        chain: Arc<dyn ChainGateway>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            storage,
            records,
            chain,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run a status update (step D) with the configured number of tries
    async fn update_with_retry<F, Fut>(&self, record_id: &str, update: F) -> Result<(), PipelineError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<(), CollaboratorError>>,
    {
        let attempts = self.config.record_update_attempts.max(1);
        let mut attempt = 1;

        loop {
            match update().await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        record_id,
                        attempt,
                        attempts,
                        error = %e,
                        "status update failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        record_id,
                        attempts,
                        error = %e,
                        "status update failed, record left without terminal status"
                    );
                    return Err(PipelineError::RecordUpdateFailed {
                        record_id: record_id.to_string(),
                        source: e,
                    });
                }
            }
        }
    }
}

/// Settle a chain submission into an optional hash, logging why none came back
fn settle_submission(
    step: &'static str,
    result: Result<serde_json::Value, CollaboratorError>,
) -> Option<String> {
    match result {
        Ok(value) => {
            let hash = normalize_tx_hash(&value);
            if hash.is_none() {
                tracing::warn!(step, result = %value, "chain returned no transaction hash");
            }
            hash
        }
        Err(e) => {
            tracing::warn!(step, error = %e, "chain transaction failed");
            None
        }
    }
}
