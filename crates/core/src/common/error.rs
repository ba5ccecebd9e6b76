//! Configuration errors.
//!
//! The hierarchy itself has no recoverable error channel: every access
//! resolves to a hit, a miss or an eviction. Malformed geometry and
//! unsupported core counts are rejected here, before any cache, DRAM or
//! memory system is constructed.

use thiserror::Error;

/// A configuration rejected by [`Config::validate`](crate::config::Config::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The line size is zero.
    #[error("cache line size must be non-zero")]
    ZeroLineSize,

    /// The line size does not evenly divide the DRAM row buffer.
    #[error("cache line size {line_bytes} does not divide the {row_bytes}-byte row buffer")]
    LineSizeVsRowBuffer {
        /// Configured line size in bytes.
        line_bytes: u64,
        /// Row buffer size in bytes.
        row_bytes: u64,
    },

    /// A cache level has zero capacity or zero ways.
    #[error("{level}: size ({size_bytes}) and ways ({ways}) must be non-zero")]
    EmptyCache {
        /// Cache level name.
        level: &'static str,
        /// Configured capacity in bytes.
        size_bytes: u64,
        /// Configured associativity.
        ways: usize,
    },

    /// The capacity is not a whole number of sets.
    #[error(
        "{level}: capacity {size_bytes} is not divisible by line size {line_bytes} x {ways} ways"
    )]
    UnevenGeometry {
        /// Cache level name.
        level: &'static str,
        /// Configured capacity in bytes.
        size_bytes: u64,
        /// Configured line size in bytes.
        line_bytes: u64,
        /// Configured associativity.
        ways: usize,
    },

    /// A partitioning policy was given a quota that leaves one core with no ways.
    #[error("{level}: core-0 way quota {quota} must satisfy 0 < quota < {ways}")]
    QuotaOutOfRange {
        /// Cache level name.
        level: &'static str,
        /// Configured core-0 quota.
        quota: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// The core count does not match the topology.
    #[error("{topology} topology requires {expected} core(s), got {cores}")]
    UnsupportedCores {
        /// Topology name.
        topology: &'static str,
        /// Required core count.
        expected: usize,
        /// Configured core count.
        cores: usize,
    },
}
