//! Core-Agnostic FIFO Policy.
//!
//! Victim selection is plain FIFO. The difference from [`FifoPolicy`](super::FifoPolicy)
//! is on the lookup side: a line hits for any requesting core, so two cores
//! touching the same line address share one copy.

use super::{ReplacementPolicy, oldest_where};
use crate::cache::CacheSet;
use crate::common::CoreId;

/// FIFO victims with owner-blind hits.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreAgnosticPolicy;

impl CoreAgnosticPolicy {
    /// Creates a new core-agnostic policy.
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for CoreAgnosticPolicy {
    fn name(&self) -> &'static str {
        "core-agnostic"
    }

    fn matches_core(&self) -> bool {
        false
    }

    fn select_victim(&mut self, set: &CacheSet, _core: CoreId, _now: u64) -> Option<usize> {
        oldest_where(set, |_| true)
    }
}
