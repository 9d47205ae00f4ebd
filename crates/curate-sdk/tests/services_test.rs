//! End-to-end tests: config file → services → HTTP collaborators

use curate_sdk::{CurateConfig, Notice, PostChainStatus, PublishInput, Services};
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

fn write_config(server: &MockServer) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"
[backend]
base_url = "{uri}"
timeout_secs = 5

[storage]
base_url = "{uri}"
timeout_secs = 5

[chain]
rpc_url = "{uri}/rpc"
contract_address = "0xcontract"
timeout_secs = 5

[claps]
delay_ms = 50
max_claps_per_user = 10
"#,
        uri = server.uri()
    )?;
    Ok(file)
}

fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    }))
}

#[tokio::test]
async fn test_publish_through_http_collaborators() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cid": CID })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_partial_json(json!({ "method": "curate_postCount" })))
        .respond_with(rpc_result(json!(9)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_partial_json(json!({ "contentRef": CID, "sequenceNumber": 10 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "post-1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_partial_json(json!({ "method": "curate_registerPost" })))
        .respond_with(rpc_result(json!({ "hash": "0xabc" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/posts/post-1"))
        .and(body_json(json!({
            "transactionHash": "0xabc",
            "status": "BLOCKCHAIN_INITIATED"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let file = write_config(&server)?;
    let config = CurateConfig::load(file.path())?;
    let services = Services::connect(&config)?;
    let pipeline = services.pipeline(config.pipeline_config());

    let outcome = pipeline
        .publish_post(PublishInput {
            title: "Hello".into(),
            content: "Body".into(),
            author_identity: "0xauthor".into(),
            tags: vec!["rust".into()],
            cover_image: None,
        })
        .await?;

    assert_eq!(outcome.post_record_id, "post-1");
    assert_eq!(outcome.status, PostChainStatus::BlockchainInitiated);
    assert_eq!(outcome.transaction_hash.as_deref(), Some("0xabc"));
    Ok(())
}

#[tokio::test]
async fn test_rpc_error_degrades_publish() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cid": CID })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "post-2" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "execution reverted" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/posts/post-2"))
        .and(body_json(json!({ "status": "BLOCKCHAIN_FAILED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let file = write_config(&server)?;
    let config = CurateConfig::load(file.path())?;
    let services = Services::connect(&config)?;

    let result = services
        .pipeline(config.pipeline_config())
        .publish_post(PublishInput {
            title: "Hello".into(),
            content: "Body".into(),
            author_identity: "0xauthor".into(),
            tags: vec![],
            cover_image: None,
        })
        .await;

    assert_eq!(
        Notice::for_publish(&result),
        Notice::PublishedChainDegraded {
            post_record_id: "post-2".into()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_clap_session_sends_one_batch() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/post-1/claps"))
        .and(query_param("user", "0xme"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "userClaps": 8, "totalClaps": 40 })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/posts/post-1/claps"))
        .and(body_json(json!({ "count": 2 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let file = write_config(&server)?;
    let config = CurateConfig::load(file.path())?;
    let services = Services::connect(&config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let session = services.clap_session("post-1", "0xme", &config, tx).await?;
    assert_eq!(session.user_claps(), 8);

    // Only two claps remain under the ceiling of 10
    assert_eq!(session.clap(1), 1);
    assert_eq!(session.clap(5), 1);
    assert_eq!(session.total_claps(), 42);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(session.pending_count(), 0);
    assert!(rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn test_missing_config_file_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = CurateConfig::load(dir.path().join("absent.toml"))?;
    assert_eq!(config, CurateConfig::default());

    // Defaults carry no contract address
    assert!(Services::connect(&config).is_err());
    Ok(())
}
