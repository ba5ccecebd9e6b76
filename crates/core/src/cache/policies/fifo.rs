//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Evicts the line with the smallest insertion time in the set, whichever
//! core owns it. Hits do not refresh the insertion time.
//!
//! # Performance
//!
//! - `select_victim()`: O(W) scan of the set
//! - No per-set state beyond the insertion time already held in each line

use super::{ReplacementPolicy, oldest_where};
use crate::cache::CacheSet;
use crate::common::CoreId;

/// FIFO policy. Stateless: the age lives in the lines themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoPolicy;

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn select_victim(&mut self, set: &CacheSet, _core: CoreId, _now: u64) -> Option<usize> {
        oldest_where(set, |_| true)
    }
}
