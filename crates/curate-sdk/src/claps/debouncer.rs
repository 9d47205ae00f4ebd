//! Trailing-edge clap debouncer with accumulation
//!
//! Collapses a burst of clap events into a single downstream call:
//! - Each `add_clap` restarts the idle timer and adds to a running total
//! - The total is capped at the user's remaining clap allowance
//! - When the timer fires uninterrupted, the total is flushed once
//!
//! Unlike a plain debounce, which keeps only the last call, every clap in the
//! window is counted.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handler receiving the accumulated clap count
pub type ClapHandler = Arc<dyn Fn(u32) + Send + Sync>;

/// Default idle delay before a batch is flushed
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Configuration for the clap debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClapDebouncerConfig {
    /// Idle time before pending claps are flushed
    pub delay: Duration,
    /// Ceiling on the pending total
    pub max_claps: u32,
}

impl Default for ClapDebouncerConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            max_claps: 50,
        }
    }
}

impl ClapDebouncerConfig {
    /// Config whose ceiling is what remains of a per-user allowance
    pub fn remaining(delay: Duration, max_claps_per_user: u32, already_clapped: u64) -> Self {
        Self {
            delay,
            max_claps: remaining_allowance(max_claps_per_user, already_clapped),
        }
    }
}

/// Claps a user may still add given how many they already have
pub fn remaining_allowance(max_claps_per_user: u32, already_clapped: u64) -> u32 {
    let already = u32::try_from(already_clapped).unwrap_or(u32::MAX);
    max_claps_per_user.saturating_sub(already)
}

/// Where the flush handler comes from
///
/// `Provider` is called right before every flush, so a handler built from
/// values that change after construction is always the freshest one.
#[derive(Clone)]
pub enum FlushCallback {
    Direct(ClapHandler),
    Provider(Arc<dyn Fn() -> ClapHandler + Send + Sync>),
}

impl FlushCallback {
    pub fn direct(handler: impl Fn(u32) + Send + Sync + 'static) -> Self {
        Self::Direct(Arc::new(handler))
    }

    pub fn provider(provider: impl Fn() -> ClapHandler + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(provider))
    }

    fn resolve(&self) -> ClapHandler {
        match self {
            Self::Direct(handler) => handler.clone(),
            Self::Provider(provider) => provider(),
        }
    }
}

struct DebounceState {
    pending: u32,
    max_claps: u32,
    /// Bumped on every reschedule, flush and cancel; stale timers compare against it
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl DebounceState {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

struct Inner {
    delay: Duration,
    callback: FlushCallback,
    state: Mutex<DebounceState>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, DebounceState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Take the pending total and hand it to the callback, outside the lock
    fn deliver(&self, mut state: MutexGuard<'_, DebounceState>) {
        let count = std::mem::take(&mut state.pending);
        drop(state);

        if count > 0 {
            tracing::debug!(count, "flushing clap batch");
            let handler = self.callback.resolve();
            handler(count);
        }
    }

    fn flush_from_timer(&self, generation: u64) {
        let mut state = self.state();
        if state.generation != generation {
            return;
        }
        state.timer = None;
        state.generation = state.generation.wrapping_add(1);
        self.deliver(state);
    }
}

/// Clap debouncer
///
/// Must be used from within a Tokio runtime; the idle timer is a spawned task.
///
/// # Example
///
/// ```rust,ignore
/// use curate_sdk::{ClapDebouncer, ClapDebouncerConfig, FlushCallback};
///
/// let debouncer = ClapDebouncer::new(
///     ClapDebouncerConfig::default(),
///     FlushCallback::direct(|count| println!("send {count} claps")),
/// );
///
/// debouncer.add_clap(1);
/// debouncer.add_clap(1);
/// // ...1.5s of quiet later the callback runs once with 2
/// ```
pub struct ClapDebouncer {
    inner: Arc<Inner>,
}

impl ClapDebouncer {
    pub fn new(config: ClapDebouncerConfig, callback: FlushCallback) -> Self {
        Self {
            inner: Arc::new(Inner {
                delay: config.delay,
                callback,
                state: Mutex::new(DebounceState {
                    pending: 0,
                    max_claps: config.max_claps,
                    generation: 0,
                    timer: None,
                }),
            }),
        }
    }

    /// Add claps to the pending batch and restart the idle timer
    ///
    /// A count of zero is ignored.
    pub fn add_clap(&self, count: u32) {
        if count == 0 {
            return;
        }

        let mut state = self.inner.state();
        state.cancel_timer();
        state.pending = state.pending.saturating_add(count).min(state.max_claps);

        if state.pending == 0 {
            tracing::debug!("clap allowance exhausted, nothing scheduled");
            return;
        }

        let generation = state.generation;
        let delay = self.inner.delay;
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);

        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = inner.upgrade() {
                inner.flush_from_timer(generation);
            }
        }));
    }

    /// Send pending claps now; no-op when nothing is pending
    pub fn flush(&self) {
        let mut state = self.inner.state();
        state.cancel_timer();
        self.inner.deliver(state);
    }

    /// Drop pending claps without calling the callback
    pub fn cancel(&self) {
        let mut state = self.inner.state();
        state.cancel_timer();
        if state.pending > 0 {
            tracing::debug!(discarded = state.pending, "clap batch cancelled");
        }
        state.pending = 0;
    }

    /// Change the ceiling, clamping anything already pending
    pub fn set_max_claps(&self, max_claps: u32) {
        let mut state = self.inner.state();
        state.max_claps = max_claps;
        state.pending = state.pending.min(max_claps);
    }

    pub fn max_claps(&self) -> u32 {
        self.inner.state().max_claps
    }

    pub fn pending_count(&self) -> u32 {
        self.inner.state().pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }
}

impl Drop for ClapDebouncer {
    fn drop(&mut self) {
        let mut state = self.inner.state();
        state.cancel_timer();
    }
}
