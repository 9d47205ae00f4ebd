//! SDK configuration
//!
//! Loaded from TOML; every section and field has a default so a partial file
//! parses. The chain contract address has no usable default and must be set.
//!
//! ```toml
//! [backend]
//! base_url = "https://curate.example.com/api"
//!
//! [chain]
//! rpc_url = "https://relay.example.com/rpc"
//! contract_address = "0x..."
//!
//! [claps]
//! delay_ms = 1500
//! max_claps_per_user = 50
//! teardown = "flush"
//!
//! [pipeline]
//! record_update_attempts = 3
//! ```

use crate::claps::{ClapSessionConfig, TeardownPolicy};
use crate::error::ConfigError;
use crate::pipeline::PipelineConfig;
use curate_client::{ChainConfig, EndpointConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurateConfig {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub chain: ChainSection,
    #[serde(default)]
    pub claps: ClapsSection,
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// REST backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSection {
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// IPFS/Filecoin pinning service endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    #[serde(default = "default_storage_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            base_url: default_storage_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSection {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// CurateAi contract address
    #[serde(default)]
    pub contract_address: String,

    #[serde(default = "default_chain_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChainSection {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: String::new(),
            timeout_secs: default_chain_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClapsSection {
    /// Idle time before a clap batch is sent
    #[serde(default = "default_clap_delay_ms")]
    pub delay_ms: u64,

    /// Maximum claps one user may give one post
    #[serde(default = "default_max_claps")]
    pub max_claps_per_user: u32,

    /// What to do with unsent claps when a session ends
    #[serde(default)]
    pub teardown: TeardownPolicy,
}

impl Default for ClapsSection {
    fn default() -> Self {
        Self {
            delay_ms: default_clap_delay_ms(),
            max_claps_per_user: default_max_claps(),
            teardown: TeardownPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSection {
    /// Tries for the final record status update; 1 means no retry
    #[serde(default = "default_update_attempts")]
    pub record_update_attempts: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            record_update_attempts: default_update_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

// Defaults
fn default_backend_url() -> String { "http://localhost:3000/api".to_string() }
fn default_storage_url() -> String { "http://localhost:5001/api".to_string() }
fn default_rpc_url() -> String { "http://localhost:8545".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_chain_timeout_secs() -> u64 { 60 }
fn default_clap_delay_ms() -> u64 { 1500 }
fn default_max_claps() -> u32 { 50 }
fn default_update_attempts() -> u32 { 1 }
fn default_retry_backoff_ms() -> u64 { 500 }

impl Default for CurateConfig {
    fn default() -> Self {
        Self {
            backend: BackendSection::default(),
            storage: StorageSection::default(),
            chain: ChainSection::default(),
            claps: ClapsSection::default(),
            pipeline: PipelineSection::default(),
        }
    }
}

impl CurateConfig {
    /// Load from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("backend.base_url", &self.backend.base_url),
            ("storage.base_url", &self.storage.base_url),
            ("chain.rpc_url", &self.chain.rpc_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }

        if self.chain.contract_address.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "chain.contract_address must not be empty".into(),
            ));
        }

        if self.claps.max_claps_per_user == 0 {
            return Err(ConfigError::Invalid(
                "claps.max_claps_per_user must be at least 1".into(),
            ));
        }

        if self.pipeline.record_update_attempts == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.record_update_attempts must be at least 1".into(),
            ));
        }

        Ok(())
    }

    pub fn backend_endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            base_url: self.backend.base_url.clone(),
            api_key: self.backend.api_key.clone(),
            timeout_secs: self.backend.timeout_secs,
        }
    }

    pub fn storage_endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            base_url: self.storage.base_url.clone(),
            api_key: self.storage.api_key.clone(),
            timeout_secs: self.storage.timeout_secs,
        }
    }

    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            rpc_url: self.chain.rpc_url.clone(),
            contract_address: self.chain.contract_address.clone(),
            timeout_secs: self.chain.timeout_secs,
        }
    }

    pub fn clap_session_config(&self) -> ClapSessionConfig {
        ClapSessionConfig {
            delay: Duration::from_millis(self.claps.delay_ms),
            max_claps_per_user: self.claps.max_claps_per_user,
            teardown: self.claps.teardown,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            record_update_attempts: self.pipeline.record_update_attempts,
            retry_backoff: Duration::from_millis(self.pipeline.retry_backoff_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: &str = "[chain]\ncontract_address = \"0xcontract\"\n";

    #[test]
    fn test_minimal_document_uses_defaults() {
        let config = CurateConfig::from_toml_str(CHAIN).unwrap();
        assert_eq!(config.backend, BackendSection::default());
        assert_eq!(config.claps.delay_ms, 1500);
        assert_eq!(config.storage.base_url, "http://localhost:5001/api");
        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_config().contract_address, "0xcontract");
        assert_eq!(config.pipeline.record_update_attempts, 1);
    }

    #[test]
    fn test_rejects_missing_contract_address() {
        let result = CurateConfig::from_toml_str("");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = CurateConfig::from_toml_str("[chain]\ncontract_address = \"  \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(CurateConfig::default().validate().is_err());
    }

    #[test]
    fn test_partial_sections() {
        let config = CurateConfig::from_toml_str(
            r#"
[backend]
base_url = "https://curate.example.com/api"
api_key = "secret"

[claps]
max_claps_per_user = 20
teardown = "discard"

[storage]
api_key = "pin-key"

[chain]
contract_address = "0xcontract"

[pipeline]
record_update_attempts = 3
retry_backoff_ms = 250
"#,
        )
        .unwrap();

        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend_endpoint().api_key.as_deref(), Some("secret"));
        assert_eq!(config.storage_endpoint().base_url, "http://localhost:5001/api");

        let claps = config.clap_session_config();
        assert_eq!(claps.max_claps_per_user, 20);
        assert_eq!(claps.delay, Duration::from_millis(1500));
        assert_eq!(claps.teardown, TeardownPolicy::Discard);

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.record_update_attempts, 3);
        assert_eq!(pipeline.retry_backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let result = CurateConfig::from_toml_str(&format!(
            "{CHAIN}[pipeline]\nrecord_update_attempts = 0\n"
        ));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_clap_ceiling() {
        let result =
            CurateConfig::from_toml_str(&format!("{CHAIN}[claps]\nmax_claps_per_user = 0\n"));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_teardown() {
        let result = CurateConfig::from_toml_str("[claps]\nteardown = \"explode\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
