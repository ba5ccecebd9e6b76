//! Victim Selection Policies.
//!
//! Picks the way to evict from a full set. Invalid ways are always filled
//! first by [`Cache::find_victim`](super::Cache::find_victim); the policies
//! here only ever see sets whose ways are all valid.
//!
//! # Policies
//!
//! - `Fifo`: oldest insertion time, regardless of owner.
//! - `StaticPartition`: fixed core-0 way quota, FIFO within the chosen core's ways.
//! - `DynamicPartition`: same pools, quota re-derived each epoch, owner-blind hits.
//! - `CoreAgnostic`: FIFO victims, and hits match lines owned by any core.

/// Core-agnostic FIFO policy.
pub mod core_agnostic;

/// Utility-driven dynamic way partitioning.
pub mod dynamic_partition;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Static way partitioning between two cores.
pub mod static_partition;

pub use core_agnostic::CoreAgnosticPolicy;
pub use dynamic_partition::DynamicPartitionPolicy;
pub use fifo::FifoPolicy;
pub use static_partition::StaticPartitionPolicy;

use std::fmt;

use super::CacheSet;
use crate::common::CoreId;

/// Trait for cache victim selection policies.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Short policy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether a hit also requires the line to be owned by the requesting core.
    fn matches_core(&self) -> bool {
        true
    }

    /// Selects the way to evict from a set whose ways are all valid.
    ///
    /// # Arguments
    ///
    /// * `set` - The full set.
    /// * `core` - The core whose miss triggered the install.
    /// * `now` - Current cycle, as passed to the install.
    ///
    /// # Returns
    ///
    /// The way to evict, or `None` if the policy's candidate pool is empty.
    fn select_victim(&mut self, set: &CacheSet, core: CoreId, now: u64) -> Option<usize>;
}

/// Oldest valid way satisfying `keep`, earliest way winning ties.
pub(crate) fn oldest_where(set: &CacheSet, keep: impl Fn(CoreId) -> bool) -> Option<usize> {
    set.lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| line.valid && keep(line.core_id))
        .min_by_key(|(_, line)| line.inserted_at)
        .map(|(way, _)| way)
}

/// Core whose ways form the eviction pool under a core-0 quota.
///
/// Below quota, core 0 grows at core 1's expense; above it, core 0 gives
/// ways back; at quota, each core replaces its own lines.
pub(crate) fn partition_pool(set: &CacheSet, core0_quota: usize, core: CoreId) -> CoreId {
    let core0_ways = set.ways_owned_by(0);
    match core0_ways.cmp(&core0_quota) {
        std::cmp::Ordering::Less => 1,
        std::cmp::Ordering::Greater => 0,
        std::cmp::Ordering::Equal => core,
    }
}
