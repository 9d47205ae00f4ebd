//! Client tests against a mock HTTP server

use curate_client::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

fn endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        base_url: server.uri(),
        api_key: None,
        timeout_secs: 5,
    }
}

fn chain(server: &MockServer) -> ChainClient {
    ChainClient::new(ChainConfig {
        rpc_url: server.uri(),
        contract_address: "0xcontract".into(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_create_and_update_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_partial_json(json!({
            "title": "Hello",
            "contentRef": CID_V1,
            "authorIdentity": "0xauthor",
            "sequenceNumber": 4
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "p1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/posts/p1"))
        .and(body_json(json!({
            "transactionHash": "0xabc",
            "status": "BLOCKCHAIN_INITIATED"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = BackendClient::new(endpoint(&server)).unwrap();

    let record = backend
        .create_post(&CreatePostRequest {
            title: "Hello".into(),
            content: "Body".into(),
            content_ref: CID_V1.into(),
            author_identity: "0xauthor".into(),
            sequence_number: Some(4),
        })
        .await
        .unwrap();
    assert_eq!(record.id, "p1");

    backend
        .update_post(
            "p1",
            &UpdatePostRequest {
                transaction_hash: Some("0xabc".into()),
                status: PostChainStatus::BlockchainInitiated,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_error_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scores"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let backend = BackendClient::new(endpoint(&server)).unwrap();
    let err = backend
        .create_score(&CreateScoreRequest {
            post_record_id: "p1".into(),
            voter_identity: "0xvoter".into(),
            quantity: 10,
            vote_percentage: 25.0,
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_clap_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/p1/claps"))
        .and(body_json(json!({"count": 3})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts/p1/claps"))
        .and(query_param("user", "0xme"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"userClaps": 4, "totalClaps": 20})),
        )
        .mount(&server)
        .await;

    let backend = BackendClient::new(endpoint(&server)).unwrap();
    backend
        .add_claps("p1", &AddClapsRequest { count: 3 })
        .await
        .unwrap();

    let counts = backend.get_clap_counts("p1", "0xme").await.unwrap();
    assert_eq!(
        counts,
        ClapCounts {
            user_claps: 4,
            total_claps: 20
        }
    );
}

#[tokio::test]
async fn test_upload_returns_validated_cid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_partial_json(json!({"title": "Hello", "tags": ["rust"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cid": CID_V1})))
        .mount(&server)
        .await;

    let storage = StorageClient::new(endpoint(&server)).unwrap();
    let cid = storage
        .upload(&UploadPayload {
            title: "Hello".into(),
            content: "Body".into(),
            author_identity: "0xauthor".into(),
            tags: vec!["rust".into()],
            cover_image: None,
        })
        .await
        .unwrap();

    assert_eq!(cid, CID_V1);
}

#[tokio::test]
async fn test_upload_accepts_several_reference_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cid": CID_V1,
            "Hash": CID_V1,
            "contentRef": CID_V1
        })))
        .mount(&server)
        .await;

    let storage = StorageClient::new(endpoint(&server)).unwrap();
    let cid = storage
        .upload(&UploadPayload {
            title: "Hello".into(),
            content: "Body".into(),
            author_identity: "0xauthor".into(),
            tags: vec![],
            cover_image: None,
        })
        .await
        .unwrap();

    assert_eq!(cid, CID_V1);
}

#[tokio::test]
async fn test_upload_without_cid_fails_loudly() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cid": ""})))
        .mount(&server)
        .await;

    let storage = StorageClient::new(endpoint(&server)).unwrap();
    let result = storage
        .upload(&UploadPayload {
            title: "Hello".into(),
            content: "Body".into(),
            author_identity: "0xauthor".into(),
            tags: vec![],
            cover_image: None,
        })
        .await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_chain_register_returns_raw_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "curate_registerPost",
            "params": ["0xcontract", CID_V1, ["rust"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"hash": "0xdef"}
        })))
        .mount(&server)
        .await;

    let result = chain(&server)
        .register_post(CID_V1, &["rust".to_string()])
        .await
        .unwrap();
    assert_eq!(result, json!({"hash": "0xdef"}));
}

#[tokio::test]
async fn test_chain_rpc_error_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 4001, "message": "user rejected"}
        })))
        .mount(&server)
        .await;

    let err = chain(&server).vote(3, 10).await.unwrap_err();
    match err {
        ClientError::Rpc { code, message } => {
            assert_eq!(code, 4001);
            assert_eq!(message, "user rejected");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_chain_post_count_hex() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "curate_postCount"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": "0x2a"
        })))
        .mount(&server)
        .await;

    assert_eq!(chain(&server).post_count().await.unwrap(), 42);
}
