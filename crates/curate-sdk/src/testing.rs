//! In-memory collaborators for tests
//!
//! Each mock records the calls it receives and can be told to fail.

use crate::error::CollaboratorError;
use crate::pipeline::{ChainGateway, ClapSink, ContentStore, RecordStore};
use async_trait::async_trait;
use curate_client::{
    CreatePostRequest, CreateScoreRequest, UpdatePostRequest, UpdateScoreRequest, UploadPayload,
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

fn take<T: Clone>(calls: &Mutex<Vec<T>>) -> Vec<T> {
    calls.lock().unwrap_or_else(|p| p.into_inner()).clone()
}

fn push<T>(calls: &Mutex<Vec<T>>, call: T) {
    calls.lock().unwrap_or_else(|p| p.into_inner()).push(call);
}

/// Mock content-addressed storage
pub struct MockContentStore {
    response: Result<String, String>,
    calls: Mutex<Vec<UploadPayload>>,
}

impl MockContentStore {
    /// Storage that returns `content_ref` for every upload
    pub fn returning(content_ref: impl Into<String>) -> Self {
        Self {
            response: Ok(content_ref.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Storage that rejects every upload
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<UploadPayload> {
        take(&self.calls)
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn upload(&self, payload: &UploadPayload) -> Result<String, CollaboratorError> {
        push(&self.calls, payload.clone());
        self.response.clone().map_err(CollaboratorError::Rejected)
    }
}

/// Mock database of post and score records
pub struct MockRecordStore {
    post_id: String,
    score_id: String,
    fail_create: AtomicBool,
    /// Update calls that fail before updates start succeeding
    update_failures: AtomicU32,
    created_posts: Mutex<Vec<CreatePostRequest>>,
    post_updates: Mutex<Vec<(String, UpdatePostRequest)>>,
    created_scores: Mutex<Vec<CreateScoreRequest>>,
    score_updates: Mutex<Vec<(String, UpdateScoreRequest)>>,
    update_attempts: AtomicU32,
}

impl MockRecordStore {
    pub fn new(post_id: impl Into<String>, score_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            score_id: score_id.into(),
            fail_create: AtomicBool::new(false),
            update_failures: AtomicU32::new(0),
            created_posts: Mutex::new(Vec::new()),
            post_updates: Mutex::new(Vec::new()),
            created_scores: Mutex::new(Vec::new()),
            score_updates: Mutex::new(Vec::new()),
            update_attempts: AtomicU32::new(0),
        }
    }

    /// Reject record creation
    pub fn with_failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    /// Fail the first `count` status updates
    pub fn with_update_failures(self, count: u32) -> Self {
        self.update_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn created_posts(&self) -> Vec<CreatePostRequest> {
        take(&self.created_posts)
    }

    /// Successful post updates
    pub fn post_updates(&self) -> Vec<(String, UpdatePostRequest)> {
        take(&self.post_updates)
    }

    pub fn created_scores(&self) -> Vec<CreateScoreRequest> {
        take(&self.created_scores)
    }

    /// Successful score updates
    pub fn score_updates(&self) -> Vec<(String, UpdateScoreRequest)> {
        take(&self.score_updates)
    }

    /// Update calls made, failed ones included
    pub fn update_attempts(&self) -> u32 {
        self.update_attempts.load(Ordering::SeqCst)
    }

    fn check_create(&self) -> Result<(), CollaboratorError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(CollaboratorError::rejected("database unavailable"));
        }
        Ok(())
    }

    fn check_update(&self) -> Result<(), CollaboratorError> {
        self.update_attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.update_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.update_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(CollaboratorError::rejected("database write timed out"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn create_post(&self, input: &CreatePostRequest) -> Result<String, CollaboratorError> {
        push(&self.created_posts, input.clone());
        self.check_create()?;
        Ok(self.post_id.clone())
    }

    async fn update_post(
        &self,
        post_record_id: &str,
        update: &UpdatePostRequest,
    ) -> Result<(), CollaboratorError> {
        self.check_update()?;
        push(&self.post_updates, (post_record_id.to_string(), update.clone()));
        Ok(())
    }

    async fn create_score(&self, input: &CreateScoreRequest) -> Result<String, CollaboratorError> {
        push(&self.created_scores, input.clone());
        self.check_create()?;
        Ok(self.score_id.clone())
    }

    async fn update_score(
        &self,
        score_record_id: &str,
        update: &UpdateScoreRequest,
    ) -> Result<(), CollaboratorError> {
        self.check_update()?;
        push(&self.score_updates, (score_record_id.to_string(), update.clone()));
        Ok(())
    }
}

/// Mock chain provider
pub struct MockChain {
    post_count: Option<u64>,
    submission: Result<Value, String>,
    registrations: Mutex<Vec<(String, Vec<String>)>>,
    votes: Mutex<Vec<(u64, u64)>>,
}

impl MockChain {
    /// Chain whose submissions resolve to `result`
    pub fn resolving(result: Value) -> Self {
        Self {
            post_count: Some(0),
            submission: Ok(result),
            registrations: Mutex::new(Vec::new()),
            votes: Mutex::new(Vec::new()),
        }
    }

    /// Chain whose submissions are rejected
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            post_count: Some(0),
            submission: Err(message.into()),
            registrations: Mutex::new(Vec::new()),
            votes: Mutex::new(Vec::new()),
        }
    }

    /// Post count to report; `None` makes the read fail
    pub fn with_post_count(mut self, count: Option<u64>) -> Self {
        self.post_count = count;
        self
    }

    pub fn registrations(&self) -> Vec<(String, Vec<String>)> {
        take(&self.registrations)
    }

    pub fn votes(&self) -> Vec<(u64, u64)> {
        take(&self.votes)
    }
}

#[async_trait]
impl ChainGateway for MockChain {
    async fn post_count(&self) -> Result<u64, CollaboratorError> {
        self.post_count
            .ok_or_else(|| CollaboratorError::rejected("contract read failed"))
    }

    async fn register_post(
        &self,
        content_ref: &str,
        tags: &[String],
    ) -> Result<Value, CollaboratorError> {
        push(&self.registrations, (content_ref.to_string(), tags.to_vec()));
        self.submission.clone().map_err(CollaboratorError::Rejected)
    }

    async fn vote(&self, post_internal_id: u64, quantity: u64) -> Result<Value, CollaboratorError> {
        push(&self.votes, (post_internal_id, quantity));
        self.submission.clone().map_err(CollaboratorError::Rejected)
    }
}

/// Mock clap endpoint
pub struct MockClapSink {
    fail: AtomicBool,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockClapSink {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sink that rejects every batch
    pub fn failing() -> Self {
        let sink = Self::new();
        sink.fail.store(true, Ordering::SeqCst);
        sink
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        take(&self.calls)
    }
}

impl Default for MockClapSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClapSink for MockClapSink {
    async fn add_claps(&self, post_id: &str, count: u32) -> Result<(), CollaboratorError> {
        push(&self.calls, (post_id.to_string(), count));
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::rejected("network error"));
        }
        Ok(())
    }
}
