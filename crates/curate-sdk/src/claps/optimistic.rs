//! Optimistic counter cache entries
//!
//! A counter pairs the last server-confirmed value with an optional local
//! override. The override is what the UI shows while a request is in flight;
//! it is dropped once the server-confirmed value changes.

use curate_client::ClapCounts;

/// One optimistic counter: `{ committed, override }`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimisticCounter {
    committed: u64,
    overridden: Option<u64>,
}

impl OptimisticCounter {
    pub fn new(committed: u64) -> Self {
        Self {
            committed,
            overridden: None,
        }
    }

    /// Value to display: the override if set, otherwise the committed value
    pub fn value(&self) -> u64 {
        self.overridden.unwrap_or(self.committed)
    }

    pub fn committed(&self) -> u64 {
        self.committed
    }

    pub fn override_value(&self) -> Option<u64> {
        self.overridden
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden.is_some()
    }

    /// Bump the displayed value by `delta`
    pub fn apply(&mut self, delta: u64) {
        self.overridden = Some(self.value().saturating_add(delta));
    }

    /// Take back `delta` from a failed action
    ///
    /// Only the failed delta is removed, so other actions still in flight keep
    /// their share. Without an override there is nothing to undo: the server
    /// value never included the failed delta.
    pub fn rollback(&mut self, delta: u64) {
        let committed = self.committed;
        self.overridden = self
            .overridden
            .map(|value| value.saturating_sub(delta))
            .filter(|value| *value > committed);
    }

    /// Accept a server value
    ///
    /// The override survives a refetch that returns the same value, since the
    /// server may not have applied the in-flight request yet.
    pub fn commit(&mut self, committed: u64) {
        if committed != self.committed {
            self.committed = committed;
            self.overridden = None;
        }
    }
}

/// The clap counters for one post: the current user's and everyone's
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimisticCounters {
    pub user: OptimisticCounter,
    pub total: OptimisticCounter,
}

impl OptimisticCounters {
    pub fn new(counts: ClapCounts) -> Self {
        Self {
            user: OptimisticCounter::new(counts.user_claps),
            total: OptimisticCounter::new(counts.total_claps),
        }
    }

    pub fn apply(&mut self, delta: u64) {
        self.user.apply(delta);
        self.total.apply(delta);
    }

    pub fn rollback(&mut self, delta: u64) {
        self.user.rollback(delta);
        self.total.rollback(delta);
    }

    pub fn commit(&mut self, counts: ClapCounts) {
        self.user.commit(counts.user_claps);
        self.total.commit(counts.total_claps);
    }

    /// Values currently shown
    pub fn displayed(&self) -> ClapCounts {
        ClapCounts {
            user_claps: self.user.value(),
            total_claps: self.total.value(),
        }
    }
}
