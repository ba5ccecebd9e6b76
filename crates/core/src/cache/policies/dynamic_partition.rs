//! Dynamic (Utility-Based) Way Partitioning.
//!
//! Uses the same pool selection as static partitioning, but the core-0
//! quota is re-derived once per epoch of [`PARTITION_EPOCH_CYCLES`] from an
//! [`OccupancyEstimator`]. The default estimator is the per-core
//! [`UtilityMonitors`] set, whose counters are allocated but never fed, so
//! the quota stays at its configured value until an estimator with a real
//! utility-counting algorithm is plugged in.
//!
//! Hits ignore the owning core, as with the core-agnostic policy.

use super::{ReplacementPolicy, oldest_where, partition_pool};
use crate::cache::CacheSet;
use crate::cache::umon::{OccupancyEstimator, UtilityMonitors};
use crate::common::CoreId;
use crate::common::constants::PARTITION_EPOCH_CYCLES;

/// Epoch-driven partition quota over a pluggable occupancy estimator.
#[derive(Debug)]
pub struct DynamicPartitionPolicy {
    static_quota: usize,
    core0_quota: usize,
    epoch: u64,
    estimator: Box<dyn OccupancyEstimator>,
}

impl DynamicPartitionPolicy {
    /// Creates the policy with one utility monitor per core, each shadowing
    /// a cache of the given geometry.
    pub fn new(
        core0_quota: usize,
        size_bytes: u64,
        ways: usize,
        line_bytes: u64,
        cores: usize,
    ) -> Self {
        let monitors = UtilityMonitors::new(size_bytes, ways, line_bytes, cores);
        Self::with_estimator(core0_quota, Box::new(monitors))
    }

    /// Creates the policy over an arbitrary estimator.
    pub fn with_estimator(core0_quota: usize, estimator: Box<dyn OccupancyEstimator>) -> Self {
        Self {
            static_quota: core0_quota,
            core0_quota,
            epoch: 0,
            estimator,
        }
    }

    /// The quota currently in force.
    pub fn core0_quota(&self) -> usize {
        self.core0_quota
    }

    /// The estimator consulted at each epoch boundary.
    pub fn estimator(&self) -> &dyn OccupancyEstimator {
        self.estimator.as_ref()
    }

    fn refresh_quota(&mut self, now: u64) {
        let epoch = now / PARTITION_EPOCH_CYCLES;
        if epoch != self.epoch {
            self.epoch = epoch;
            self.core0_quota = self.estimator.core0_quota(self.static_quota);
            tracing::debug!(epoch, quota = self.core0_quota, "partition quota re-derived");
        }
    }
}

impl ReplacementPolicy for DynamicPartitionPolicy {
    fn name(&self) -> &'static str {
        "dynamic-partition"
    }

    fn matches_core(&self) -> bool {
        false
    }

    fn select_victim(&mut self, set: &CacheSet, core: CoreId, now: u64) -> Option<usize> {
        self.refresh_quota(now);
        let pool = partition_pool(set, self.core0_quota, core);
        oldest_where(set, |owner| owner == pool)
    }
}
