//! Static Way Partitioning.
//!
//! Core 0 is entitled to `quota` ways of every set and core 1 to the rest.
//! On a miss in a full set the eviction pool is chosen by comparing core 0's
//! current way count against the quota (see [`partition_pool`]), then the
//! oldest line in that pool is evicted. Under sustained contention from both
//! cores the number of core-0 ways in a set converges to the quota.

use super::{ReplacementPolicy, oldest_where, partition_pool};
use crate::cache::CacheSet;
use crate::common::CoreId;

/// Fixed core-0 quota, FIFO within the selected partition.
#[derive(Debug, Clone, Copy)]
pub struct StaticPartitionPolicy {
    core0_quota: usize,
}

impl StaticPartitionPolicy {
    /// Creates a partition giving core 0 `core0_quota` ways per set.
    pub fn new(core0_quota: usize) -> Self {
        Self { core0_quota }
    }

    /// The configured core-0 quota.
    pub fn core0_quota(&self) -> usize {
        self.core0_quota
    }
}

impl ReplacementPolicy for StaticPartitionPolicy {
    fn name(&self) -> &'static str {
        "static-partition"
    }

    fn select_victim(&mut self, set: &CacheSet, core: CoreId, _now: u64) -> Option<usize> {
        let pool = partition_pool(set, self.core0_quota, core);
        oldest_where(set, |owner| owner == pool)
    }
}
