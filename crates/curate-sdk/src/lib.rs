//! CurateAi SDK - clap batching and the publish/vote pipeline
//!
//! # Architecture
//!
//! ```text
//!   clap events            publish / vote actions
//!        │                          │
//!        ▼                          ▼
//! ┌──────────────┐        ┌───────────────────┐
//! │ ClapSession  │        │     Pipeline      │
//! │ (optimistic  │        │ upload → create → │
//! │  counters)   │        │ chain  → update   │
//! └──────┬───────┘        └─────────┬─────────┘
//!        │                          │
//!        ▼                          ▼
//! ┌──────────────┐     ┌──────────┬──────────┬──────────┐
//! │ClapDebouncer │     │ Content  │ Record   │ Chain    │
//! └──────┬───────┘     │ Store    │ Store    │ Gateway  │
//!        ▼             └──────────┴──────────┴──────────┘
//!     ClapSink              (curate-client or mocks)
//! ```
//!
//! The database record is the source of truth for the UI. Once it exists it
//! always receives a terminal status; a failed chain transaction only
//! degrades that status.
//!
//! # Example
//!
//! ```rust,ignore
//! use curate_sdk::{CurateConfig, PublishInput, Services};
//!
//! let config = CurateConfig::load("curate.toml")?;
//! let services = Services::connect(&config)?;
//! let pipeline = services.pipeline(config.pipeline_config());
//!
//! let outcome = pipeline.publish_post(PublishInput {
//!     title: "Hello".into(),
//!     content: "...".into(),
//!     author_identity: "0xabc".into(),
//!     tags: vec!["rust".into()],
//!     cover_image: None,
//! }).await?;
//! ```

// Clap batching and optimistic counters
pub mod claps;

// Publish/vote orchestration
pub mod pipeline;

// User-facing outcome notices
pub mod notice;

// Collaborator implementations backed by curate-client
pub mod client;

// Configuration
pub mod config;

// Tracing setup
pub mod telemetry;

// In-memory collaborators for tests
pub mod testing;

// Error types
pub mod error;

// Re-export clap types
pub use claps::{
    ClapDebouncer, ClapDebouncerConfig, ClapSession, ClapSessionConfig, FlushCallback,
    OptimisticCounter, OptimisticCounters, TeardownPolicy,
};

// Re-export pipeline types
pub use pipeline::{
    normalize_tx_hash, ChainGateway, ClapSink, ContentStore, Pipeline, PipelineConfig,
    PublishInput, PublishOutcome, RecordStore, VoteInput, VoteOutcome,
};

pub use client::Services;
pub use config::CurateConfig;
pub use notice::Notice;

// Re-export error types
pub use error::{CollaboratorError, ConfigError, PipelineError, Result, SdkError};

// Re-export wire types shared with the clients
pub use curate_client::{ClapCounts, PostChainStatus, ScoreChainStatus};
