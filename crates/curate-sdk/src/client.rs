//! Collaborator implementations backed by the curate-client HTTP clients

use crate::claps::ClapSession;
use crate::config::CurateConfig;
use crate::error::CollaboratorError;
use crate::notice::Notice;
use crate::pipeline::{ChainGateway, ClapSink, ContentStore, Pipeline, PipelineConfig, RecordStore};
use async_trait::async_trait;
use curate_client::{
    AddClapsRequest, BackendClient, ChainClient, ClapCounts, CreatePostRequest,
    CreateScoreRequest, StorageClient, UpdatePostRequest, UpdateScoreRequest, UploadPayload,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

#[async_trait]
impl ContentStore for StorageClient {
    async fn upload(&self, payload: &UploadPayload) -> Result<String, CollaboratorError> {
        Ok(StorageClient::upload(self, payload).await?)
    }
}

#[async_trait]
impl RecordStore for BackendClient {
    async fn create_post(&self, input: &CreatePostRequest) -> Result<String, CollaboratorError> {
        Ok(BackendClient::create_post(self, input).await?.id)
    }

    async fn update_post(
        &self,
        post_record_id: &str,
        update: &UpdatePostRequest,
    ) -> Result<(), CollaboratorError> {
        Ok(BackendClient::update_post(self, post_record_id, update).await?)
    }

    async fn create_score(&self, input: &CreateScoreRequest) -> Result<String, CollaboratorError> {
        Ok(BackendClient::create_score(self, input).await?.id)
    }

    async fn update_score(
        &self,
        score_record_id: &str,
        update: &UpdateScoreRequest,
    ) -> Result<(), CollaboratorError> {
        Ok(BackendClient::update_score(self, score_record_id, update).await?)
    }
}

#[async_trait]
impl ClapSink for BackendClient {
    async fn add_claps(&self, post_id: &str, count: u32) -> Result<(), CollaboratorError> {
        Ok(BackendClient::add_claps(self, post_id, &AddClapsRequest { count }).await?)
    }
}

#[async_trait]
impl ChainGateway for ChainClient {
    async fn post_count(&self) -> Result<u64, CollaboratorError> {
        Ok(ChainClient::post_count(self).await?)
    }

    async fn register_post(
        &self,
        content_ref: &str,
        tags: &[String],
    ) -> Result<Value, CollaboratorError> {
        Ok(ChainClient::register_post(self, content_ref, tags).await?)
    }

    async fn vote(&self, post_internal_id: u64, quantity: u64) -> Result<Value, CollaboratorError> {
        Ok(ChainClient::vote(self, post_internal_id, quantity).await?)
    }
}

/// Connected client handles for one application scope
///
/// Built once from configuration and passed to whatever needs them. Dropping
/// the last handle releases the underlying connection pools.
#[derive(Clone)]
pub struct Services {
    pub backend: Arc<BackendClient>,
    pub storage: Arc<StorageClient>,
    pub chain: Arc<ChainClient>,
}

impl Services {
    pub fn connect(config: &CurateConfig) -> crate::Result<Self> {
        config.validate()?;

        Ok(Self {
            backend: Arc::new(BackendClient::new(config.backend_endpoint())?),
            storage: Arc::new(StorageClient::new(config.storage_endpoint())?),
            chain: Arc::new(ChainClient::new(config.chain_config())?),
        })
    }

    /// Pipeline wired to these clients
    pub fn pipeline(&self, config: PipelineConfig) -> Pipeline {
        Pipeline::new(
            self.storage.clone(),
            self.backend.clone(),
            self.chain.clone(),
            config,
        )
    }

    /// Clap session for a post, starting from the server's current counts
    pub async fn clap_session(
        &self,
        post_id: &str,
        user: &str,
        config: &CurateConfig,
        notices: mpsc::UnboundedSender<Notice>,
    ) -> crate::Result<ClapSession> {
        let committed: ClapCounts = self.backend.get_clap_counts(post_id, user).await?;

        Ok(ClapSession::new(
            post_id,
            committed,
            self.backend.clone(),
            config.clap_session_config(),
            notices,
        ))
    }

    /// Refetch a post's counts and hand them to its session
    pub async fn refresh_claps(&self, session: &ClapSession, user: &str) -> crate::Result<ClapCounts> {
        let committed = self.backend.get_clap_counts(session.post_id(), user).await?;
        session.refresh(committed);
        Ok(committed)
    }
}
