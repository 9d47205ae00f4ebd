//! Clap batching for the post detail view
//!
//! Rapid clap events are collapsed into one request per idle period, and the
//! counters shown to the user are updated optimistically until the server
//! confirms them.

mod debouncer;
mod optimistic;
mod session;

pub use debouncer::{
    remaining_allowance, ClapDebouncer, ClapDebouncerConfig, ClapHandler, FlushCallback,
    DEFAULT_DELAY,
};
pub use optimistic::{OptimisticCounter, OptimisticCounters};
pub use session::{ClapSession, ClapSessionConfig, TeardownPolicy};
