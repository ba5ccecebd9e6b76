//! Utility Monitors.
//!
//! A utility monitor pairs an auxiliary tag directory (a shadow cache with
//! the owning cache's geometry) with per-way hit counters for one core.
//! The dynamic partitioning policy consults the monitors through the
//! [`OccupancyEstimator`] trait at every epoch boundary.
//!
//! The shadow directories are sized and allocated but nothing feeds them
//! yet, so [`UtilityMonitors`] reports the static quota unchanged.

use std::fmt;

use super::Cache;
use super::policies::FifoPolicy;

/// Source of the core-0 way quota for dynamic partitioning.
pub trait OccupancyEstimator: Send + Sync + fmt::Debug {
    /// Returns the quota to use for the next epoch.
    ///
    /// # Arguments
    ///
    /// * `static_quota` - The configured core-0 quota.
    fn core0_quota(&mut self, static_quota: usize) -> usize;
}

/// Shadow tag directory and utility counters for one core.
#[derive(Debug)]
pub struct UtilityMonitor {
    atd: Cache,
    counters: Vec<u64>,
}

impl UtilityMonitor {
    /// Creates a monitor shadowing a cache of the given geometry.
    pub fn new(size_bytes: u64, ways: usize, line_bytes: u64) -> Self {
        Self {
            atd: Cache::with_policy(size_bytes, ways, line_bytes, Box::new(FifoPolicy::new())),
            counters: vec![0; ways],
        }
    }

    /// The auxiliary tag directory.
    pub fn atd(&self) -> &Cache {
        &self.atd
    }

    /// Per-way hit counters.
    pub fn counters(&self) -> &[u64] {
        &self.counters
    }

    /// Total utility observed by this monitor.
    pub fn utility(&self) -> u64 {
        self.counters.iter().sum()
    }
}

/// One [`UtilityMonitor`] per core.
#[derive(Debug)]
pub struct UtilityMonitors {
    monitors: Vec<UtilityMonitor>,
}

impl UtilityMonitors {
    /// Creates `cores` monitors for a cache of the given geometry.
    pub fn new(size_bytes: u64, ways: usize, line_bytes: u64, cores: usize) -> Self {
        Self {
            monitors: (0..cores)
                .map(|_| UtilityMonitor::new(size_bytes, ways, line_bytes))
                .collect(),
        }
    }

    /// Monitor for `core`, if present.
    pub fn get(&self, core: usize) -> Option<&UtilityMonitor> {
        self.monitors.get(core)
    }

    /// Number of monitored cores.
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Whether no cores are monitored.
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl OccupancyEstimator for UtilityMonitors {
    fn core0_quota(&mut self, static_quota: usize) -> usize {
        // Counters are never fed; keep the configured split.
        static_quota
    }
}
