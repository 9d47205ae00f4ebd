//! Clap interactions for one post and one user
//!
//! Ties the debouncer to the optimistic counters:
//! - a clap bumps both counters immediately and joins the pending batch
//! - a flushed batch is sent through the [`ClapSink`]
//! - a failed send takes that batch back out of the counters
//! - a server refresh with a changed value clears the overrides

use super::debouncer::{remaining_allowance, ClapDebouncer, ClapDebouncerConfig, FlushCallback};
use super::optimistic::OptimisticCounters;
use crate::notice::Notice;
use crate::pipeline::ClapSink;
use curate_client::ClapCounts;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

/// What happens to unsent claps when the session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeardownPolicy {
    /// Send pending claps before tearing down
    #[default]
    Flush,
    /// Drop pending claps
    Discard,
}

/// Configuration for a clap session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClapSessionConfig {
    pub delay: Duration,
    pub max_claps_per_user: u32,
    pub teardown: TeardownPolicy,
}

impl Default for ClapSessionConfig {
    fn default() -> Self {
        Self {
            delay: super::debouncer::DEFAULT_DELAY,
            max_claps_per_user: 50,
            teardown: TeardownPolicy::Flush,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    counters: OptimisticCounters,
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clap session for one post
pub struct ClapSession {
    post_id: String,
    config: ClapSessionConfig,
    state: Arc<Mutex<SessionState>>,
    debouncer: ClapDebouncer,
}

impl ClapSession {
    /// Start a session from the server-confirmed counts
    ///
    /// Failed sends are reported on `notices`.
    pub fn new(
        post_id: impl Into<String>,
        committed: ClapCounts,
        sink: Arc<dyn ClapSink>,
        config: ClapSessionConfig,
        notices: mpsc::UnboundedSender<Notice>,
    ) -> Self {
        let post_id = post_id.into();
        let state = Arc::new(Mutex::new(SessionState {
            counters: OptimisticCounters::new(committed),
        }));

        let callback = {
            let post_id = post_id.clone();
            let state = state.clone();
            FlushCallback::direct(move |count| {
                send_batch(
                    post_id.clone(),
                    count,
                    sink.clone(),
                    state.clone(),
                    notices.clone(),
                )
            })
        };

        let debouncer = ClapDebouncer::new(
            ClapDebouncerConfig::remaining(
                config.delay,
                config.max_claps_per_user,
                committed.user_claps,
            ),
            callback,
        );

        Self {
            post_id,
            config,
            state,
            debouncer,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Register claps from the user; returns how many were accepted
    ///
    /// Claps beyond the per-user allowance are dropped.
    pub fn clap(&self, count: u32) -> u32 {
        let accepted = {
            let mut state = lock(&self.state);
            let remaining =
                remaining_allowance(self.config.max_claps_per_user, state.counters.user.value());
            let accepted = count.min(remaining);
            if accepted == 0 {
                return 0;
            }

            state.counters.apply(u64::from(accepted));
            accepted
        };

        self.debouncer.add_clap(accepted);
        accepted
    }

    /// Accept fresh counts from the server
    ///
    /// A refetch that still returns the old value keeps the overrides, so
    /// claps the server has not applied yet still count against the allowance.
    pub fn refresh(&self, committed: ClapCounts) {
        let shown = {
            let mut state = lock(&self.state);
            state.counters.commit(committed);
            state.counters.user.value()
        };

        // Pending claps are already part of the shown value
        let ceiling = remaining_allowance(self.config.max_claps_per_user, shown)
            .saturating_add(self.debouncer.pending_count());
        self.debouncer.set_max_claps(ceiling);
    }

    /// Send the pending batch now
    pub fn flush(&self) {
        self.debouncer.flush();
    }

    /// End the session according to the configured teardown policy
    pub fn teardown(self) {
        match self.config.teardown {
            TeardownPolicy::Flush => self.debouncer.flush(),
            TeardownPolicy::Discard => {
                let discarded = self.debouncer.pending_count();
                self.debouncer.cancel();
                lock(&self.state).counters.rollback(u64::from(discarded));
            }
        }
    }

    pub fn user_claps(&self) -> u64 {
        lock(&self.state).counters.user.value()
    }

    pub fn total_claps(&self) -> u64 {
        lock(&self.state).counters.total.value()
    }

    pub fn counters(&self) -> OptimisticCounters {
        lock(&self.state).counters
    }

    pub fn pending_count(&self) -> u32 {
        self.debouncer.pending_count()
    }
}

fn send_batch(
    post_id: String,
    count: u32,
    sink: Arc<dyn ClapSink>,
    state: Arc<Mutex<SessionState>>,
    notices: mpsc::UnboundedSender<Notice>,
) {
    tokio::spawn(async move {
        match sink.add_claps(&post_id, count).await {
            Ok(()) => {
                tracing::info!(post_id = %post_id, count, "claps recorded");
            }
            Err(e) => {
                tracing::error!(post_id = %post_id, count, error = %e, "failed to record claps");
                lock(&state).counters.rollback(u64::from(count));
                let _ = notices.send(Notice::ClapFailed { post_id });
            }
        }
    });
}
