//! HTTP clients for the services behind CurateAi
//!
//! Three collaborators, one client each:
//! - [`BackendClient`] - REST backend holding post, score and clap records
//! - [`StorageClient`] - IPFS/Filecoin pinning service returning content CIDs
//! - [`ChainClient`] - JSON-RPC relay in front of the CurateAi contract
//!
//! # Example
//!
//! ```rust,no_run
//! use curate_client::{BackendClient, EndpointConfig, UpdatePostRequest, PostChainStatus};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = BackendClient::new(EndpointConfig {
//!     base_url: "http://localhost:3000/api".into(),
//!     ..Default::default()
//! })?;
//!
//! backend
//!     .update_post(
//!         "p1",
//!         &UpdatePostRequest {
//!             transaction_hash: Some("0xabc".into()),
//!             status: PostChainStatus::BlockchainInitiated,
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod chain;
pub mod error;
pub mod storage;
pub mod types;

mod http;

// Re-export main types
pub use backend::BackendClient;
pub use chain::ChainClient;
pub use error::{ClientError, Result};
pub use storage::StorageClient;
pub use types::*;
