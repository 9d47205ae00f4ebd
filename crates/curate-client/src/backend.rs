//! HTTP client for the CurateAi REST backend

use crate::error::Result;
use crate::http::{build_client, check_status, handle_response, join};
use crate::types::*;
use reqwest::Client;

/// HTTP client for post, score and clap records
///
/// # Example
///
/// ```rust,no_run
/// use curate_client::{BackendClient, EndpointConfig, AddClapsRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = BackendClient::new(EndpointConfig::default())?;
/// backend.add_claps("p1", &AddClapsRequest { count: 3 }).await?;
/// let counts = backend.get_clap_counts("p1", "0xabc").await?;
/// # Ok(())
/// # }
/// ```
pub struct BackendClient {
    config: EndpointConfig,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // ==================== Posts ====================

    /// Create a post record
    pub async fn create_post(&self, input: &CreatePostRequest) -> Result<RecordRef> {
        let url = join(&self.config.base_url, "posts");

        let response = self.client.post(&url).json(input).send().await?;
        handle_response(response).await
    }

    /// Record the chain outcome on a post
    pub async fn update_post(&self, id: &str, input: &UpdatePostRequest) -> Result<()> {
        let url = join(
            &self.config.base_url,
            &format!("posts/{}", urlencoding::encode(id)),
        );

        let response = self.client.patch(&url).json(input).send().await?;
        check_status(response).await?;
        Ok(())
    }

    // ==================== Scores ====================

    /// Create a score record for a vote
    pub async fn create_score(&self, input: &CreateScoreRequest) -> Result<RecordRef> {
        let url = join(&self.config.base_url, "scores");

        let response = self.client.post(&url).json(input).send().await?;
        handle_response(response).await
    }

    /// Record the chain outcome on a score
    pub async fn update_score(&self, id: &str, input: &UpdateScoreRequest) -> Result<()> {
        let url = join(
            &self.config.base_url,
            &format!("scores/{}", urlencoding::encode(id)),
        );

        let response = self.client.patch(&url).json(input).send().await?;
        check_status(response).await?;
        Ok(())
    }

    // ==================== Claps ====================

    /// Add a batch of claps from the authenticated user
    pub async fn add_claps(&self, post_id: &str, input: &AddClapsRequest) -> Result<()> {
        let url = join(
            &self.config.base_url,
            &format!("posts/{}/claps", urlencoding::encode(post_id)),
        );

        let response = self.client.post(&url).json(input).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Server-confirmed clap counts for a post and user
    pub async fn get_clap_counts(&self, post_id: &str, user: &str) -> Result<ClapCounts> {
        let url = format!(
            "{}?user={}",
            join(
                &self.config.base_url,
                &format!("posts/{}/claps", urlencoding::encode(post_id)),
            ),
            urlencoding::encode(user)
        );

        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }
}
