//! Error types for the CurateAi SDK

use curate_client::ClientError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// Failure reported by an external collaborator (storage, backend, chain)
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// HTTP/RPC client failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Collaborator rejected the request
    #[error("{0}")]
    Rejected(String),
}

impl CollaboratorError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Fatal publish/vote pipeline failures
///
/// A failed chain transaction is not represented here: it is recorded as a
/// `BLOCKCHAIN_FAILED` status on the database record instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Content upload failed; nothing else was attempted
    #[error("Content upload failed: {0}")]
    UploadFailed(#[source] CollaboratorError),

    /// Database record creation failed; no chain transaction was attempted
    #[error("Record creation failed: {0}")]
    RecordCreationFailed(#[source] CollaboratorError),

    /// Final status update failed; the record exists with no terminal status
    #[error("Record update failed for {record_id}: {source}")]
    RecordUpdateFailed {
        record_id: String,
        #[source]
        source: CollaboratorError,
    },
}

impl PipelineError {
    /// Identifier of the record left behind, if one was created
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::RecordUpdateFailed { record_id, .. } => Some(record_id),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds an unusable value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level SDK error
#[derive(Error, Debug)]
pub enum SdkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
