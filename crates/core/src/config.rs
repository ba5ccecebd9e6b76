//! Configuration system for the memory hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline geometry and latencies for each cache level.
//! 2. **Structures:** Hierarchical config for the topology, caches and DRAM.
//! 3. **Enums:** Topology, replacement policy, memory controller and page policy.
//! 4. **Presets:** The five classic simulation modes (A through E).
//! 5. **Validation:** Rejects malformed geometry before anything is built.
//!
//! Configuration is supplied as JSON, or built from `Config::default()` /
//! `Config::preset(..)`.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::{
    DCACHE_HIT_LATENCY, FIXED_DRAM_LATENCY, ICACHE_HIT_LATENCY, L2CACHE_HIT_LATENCY,
    ROW_BUFFER_BYTES,
};

/// Default configuration constants for the simulator.
mod defaults {
    /// Cache line size shared by every level (64 bytes).
    pub const LINE_BYTES: u64 = 64;

    /// L1 instruction and data cache capacity (32 KiB).
    pub const L1_SIZE: u64 = 32 * 1024;

    /// L1 associativity.
    pub const L1_WAYS: usize = 8;

    /// Shared L2 capacity (1 MiB).
    pub const L2_SIZE: u64 = 1024 * 1024;

    /// L2 associativity.
    pub const L2_WAYS: usize = 16;

    /// Core-0 way quota for the partitioning policies.
    pub const SWP_CORE0_WAYS: usize = 8;

    /// Number of cores issuing references.
    pub const CORES: usize = 1;
}

/// Shape of the hierarchy built by [`MemorySystem`](crate::memsys::MemorySystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Topology {
    /// One data cache, no timing; instruction fetches bypass caching.
    SingleCache,
    /// L1 instruction and data caches over a unified L2 and DRAM.
    #[default]
    SingleCore,
    /// Private L1s per core over a shared L2 and DRAM, with per-core address translation.
    MultiCore,
}

impl Topology {
    /// Short name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::SingleCache => "single-cache",
            Self::SingleCore => "single-core",
            Self::MultiCore => "multi-core",
        }
    }
}

/// The classic simulation modes, each a fixed combination of topology,
/// controller and L2 policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SimMode {
    /// Single data cache, no timing.
    A,
    /// Single-core hierarchy over fixed-latency DRAM.
    B,
    /// Single-core hierarchy over the row-buffer DRAM model.
    C,
    /// Two cores sharing a FIFO L2.
    D,
    /// Two cores sharing a statically way-partitioned L2.
    E,
}

/// Cache replacement (victim selection) policy.
///
/// The numeric aliases are the selector values used by older configuration
/// files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ReplacementPolicy {
    /// Evict the line with the oldest insertion time.
    #[default]
    #[serde(alias = "0", alias = "fifo")]
    Fifo,
    /// Fixed way quota for core 0, FIFO within each core's partition.
    #[serde(alias = "1", alias = "swp")]
    StaticPartition,
    /// Quota re-derived each epoch from a utility monitor.
    #[serde(alias = "4", alias = "dwp")]
    DynamicPartition,
    /// FIFO, with hits matched regardless of the owning core.
    #[serde(alias = "5", alias = "shared")]
    CoreAgnostic,
}

impl ReplacementPolicy {
    /// Whether victim selection depends on the core-0 way quota.
    pub fn is_partitioned(self) -> bool {
        matches!(self, Self::StaticPartition | Self::DynamicPartition)
    }
}

/// Main memory controller implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemoryController {
    /// Flat latency per access, no bank state.
    #[default]
    Simple,
    /// Per-bank row buffers with activate/CAS/precharge/bus timing.
    #[serde(alias = "DRAM")]
    Dram,
}

/// Row-buffer management policy of the DRAM model.
///
/// `Closed` corresponds to a page-policy flag of `false`, `Open` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PagePolicy {
    /// Row hits cost CAS+bus; conflicts pay precharge+activate+CAS+bus.
    #[default]
    Closed,
    /// Row hits cost CAS+activate+bus; everything else activate+CAS+bus.
    Open,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use memsim_core::config::{Config, ReplacementPolicy, Topology};
///
/// let json = r#"{
///     "general": { "topology": "MultiCore", "cores": 2 },
///     "cache": {
///         "line_bytes": 64,
///         "swp_core0_ways": 4,
///         "l2": { "size_bytes": 65536, "ways": 8, "latency": 10, "policy": "StaticPartition" }
///     },
///     "memory": { "controller": "Dram", "page_policy": "Open" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.topology, Topology::MultiCore);
/// assert_eq!(config.cache.l2.policy, ReplacementPolicy::StaticPartition);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Topology and core count
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache hierarchy configuration
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Topology and core count.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Hierarchy shape
    #[serde(default)]
    pub topology: Topology,

    /// Number of cores issuing references
    #[serde(default = "GeneralConfig::default_cores")]
    pub cores: usize,
}

impl GeneralConfig {
    fn default_cores() -> usize {
        defaults::CORES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            cores: defaults::CORES,
        }
    }
}

/// Cache hierarchy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheHierarchyConfig {
    /// Line size in bytes, shared by all levels and by DRAM
    #[serde(default = "CacheHierarchyConfig::default_line")]
    pub line_bytes: u64,

    /// Core-0 way quota for the partitioning policies
    #[serde(default = "CacheHierarchyConfig::default_quota")]
    pub swp_core0_ways: usize,

    /// L1 instruction cache (one per core in multi-core)
    #[serde(default = "CacheHierarchyConfig::default_l1_i")]
    pub l1_i: CacheConfig,

    /// L1 data cache (one per core in multi-core)
    #[serde(default = "CacheHierarchyConfig::default_l1_d")]
    pub l1_d: CacheConfig,

    /// Unified, shared L2
    #[serde(default = "CacheHierarchyConfig::default_l2")]
    pub l2: CacheConfig,
}

impl CacheHierarchyConfig {
    fn default_line() -> u64 {
        defaults::LINE_BYTES
    }

    fn default_quota() -> usize {
        defaults::SWP_CORE0_WAYS
    }

    fn default_l1_i() -> CacheConfig {
        CacheConfig::new(defaults::L1_SIZE, defaults::L1_WAYS, ICACHE_HIT_LATENCY)
    }

    fn default_l1_d() -> CacheConfig {
        CacheConfig::new(defaults::L1_SIZE, defaults::L1_WAYS, DCACHE_HIT_LATENCY)
    }

    fn default_l2() -> CacheConfig {
        CacheConfig::new(defaults::L2_SIZE, defaults::L2_WAYS, L2CACHE_HIT_LATENCY)
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            line_bytes: defaults::LINE_BYTES,
            swp_core0_ways: defaults::SWP_CORE0_WAYS,
            l1_i: Self::default_l1_i(),
            l1_d: Self::default_l1_d(),
            l2: Self::default_l2(),
        }
    }
}

/// Individual cache level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u64,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Hit latency in cycles
    #[serde(default = "CacheConfig::default_latency")]
    pub latency: u64,

    /// Victim selection policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Creates a FIFO cache level with the given geometry and latency.
    pub fn new(size_bytes: u64, ways: usize, latency: u64) -> Self {
        Self {
            size_bytes,
            ways,
            latency,
            policy: ReplacementPolicy::Fifo,
        }
    }

    /// Returns a copy of this level using `policy`.
    #[must_use]
    pub fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of sets for the given line size: `size / (line * ways)`.
    pub fn num_sets(&self, line_bytes: u64) -> u64 {
        self.size_bytes / (line_bytes * self.ways as u64)
    }

    fn default_size() -> u64 {
        defaults::L1_SIZE
    }

    fn default_ways() -> usize {
        defaults::L1_WAYS
    }

    fn default_latency() -> u64 {
        DCACHE_HIT_LATENCY
    }

    fn validate(
        &self,
        level: &'static str,
        line_bytes: u64,
        quota: usize,
    ) -> Result<(), ConfigError> {
        if self.size_bytes == 0 || self.ways == 0 {
            return Err(ConfigError::EmptyCache {
                level,
                size_bytes: self.size_bytes,
                ways: self.ways,
            });
        }
        let set_bytes = line_bytes * self.ways as u64;
        if self.size_bytes % set_bytes != 0 {
            return Err(ConfigError::UnevenGeometry {
                level,
                size_bytes: self.size_bytes,
                line_bytes,
                ways: self.ways,
            });
        }
        if self.policy.is_partitioned() && (quota == 0 || quota >= self.ways) {
            return Err(ConfigError::QuotaOutOfRange {
                level,
                quota,
                ways: self.ways,
            });
        }
        Ok(())
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory controller type
    #[serde(default)]
    pub controller: MemoryController,

    /// Row-buffer page policy (ignored by the simple controller)
    #[serde(default)]
    pub page_policy: PagePolicy,

    /// Latency of the simple controller
    #[serde(default = "MemoryConfig::default_fixed_latency")]
    pub fixed_latency: u64,
}

impl MemoryConfig {
    fn default_fixed_latency() -> u64 {
        FIXED_DRAM_LATENCY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            controller: MemoryController::default(),
            page_policy: PagePolicy::default(),
            fixed_latency: FIXED_DRAM_LATENCY,
        }
    }
}

impl Config {
    /// Deserializes a configuration from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds the configuration for one of the classic simulation modes.
    pub fn preset(mode: SimMode) -> Self {
        let mut config = Self::default();
        match mode {
            SimMode::A => {
                config.general.topology = Topology::SingleCache;
            }
            SimMode::B => {
                config.general.topology = Topology::SingleCore;
                config.memory.controller = MemoryController::Simple;
            }
            SimMode::C => {
                config.general.topology = Topology::SingleCore;
                config.memory.controller = MemoryController::Dram;
            }
            SimMode::D | SimMode::E => {
                config.general.topology = Topology::MultiCore;
                config.general.cores = 2;
                config.memory.controller = MemoryController::Dram;
                if mode == SimMode::E {
                    config.cache.l2.policy = ReplacementPolicy::StaticPartition;
                }
            }
        }
        config
    }

    /// Checks geometry, quotas and core count.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let line_bytes = self.cache.line_bytes;
        if line_bytes == 0 {
            return Err(ConfigError::ZeroLineSize);
        }

        let topology = self.general.topology;
        let expected = match topology {
            Topology::SingleCache | Topology::SingleCore => 1,
            Topology::MultiCore => 2,
        };
        if self.general.cores != expected {
            return Err(ConfigError::UnsupportedCores {
                topology: topology.name(),
                expected,
                cores: self.general.cores,
            });
        }

        let quota = self.cache.swp_core0_ways;
        self.cache.l1_d.validate("L1-D", line_bytes, quota)?;
        if topology == Topology::SingleCache {
            return Ok(());
        }
        self.cache.l1_i.validate("L1-I", line_bytes, quota)?;
        self.cache.l2.validate("L2", line_bytes, quota)?;

        if self.memory.controller == MemoryController::Dram && ROW_BUFFER_BYTES % line_bytes != 0 {
            return Err(ConfigError::LineSizeVsRowBuffer {
                line_bytes,
                row_bytes: ROW_BUFFER_BYTES,
            });
        }
        Ok(())
    }
}
