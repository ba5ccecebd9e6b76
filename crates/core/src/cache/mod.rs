//! Set-Associative Cache.
//!
//! This module implements the cache used for every level of the hierarchy.
//! Lines are addressed by line address, split with a modulo/divide rather
//! than a bit-field split: `index = line % sets`, `tag = line / sets`, so
//! `tag * sets + index` always recovers the line address.
//!
//! Lookup ([`Cache::access`]) and fill ([`Cache::install`]) are separate
//! steps. A fill returns the prior contents of the replaced way as an
//! [`Eviction`]; the caller decides whether that needs a writeback.

/// Cache victim selection policies (FIFO, partitioned, core-agnostic).
pub mod policies;

/// Utility monitors backing the dynamic partitioning policy.
pub mod umon;

use self::policies::{
    CoreAgnosticPolicy, DynamicPartitionPolicy, FifoPolicy, ReplacementPolicy,
    StaticPartitionPolicy,
};
use crate::common::{CoreId, LineAddr};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::CacheStats;

/// Number of cores the partitioning policies arbitrate between.
const PARTITIONED_CORES: usize = 2;

/// Cache line metadata. No payload is modelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Line holds a valid tag.
    pub valid: bool,
    /// Line was written since it was installed.
    pub dirty: bool,
    /// Tag (`line address / sets`).
    pub tag: u64,
    /// Core that installed the line.
    pub core_id: CoreId,
    /// Cycle at which the line was installed.
    pub inserted_at: u64,
}

/// A fixed-capacity group of ways sharing one index.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// The ways of this set, in scan order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// First invalid way in scan order.
    pub fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }

    /// Number of ways owned by `core`.
    pub fn ways_owned_by(&self, core: CoreId) -> usize {
        self.lines.iter().filter(|line| line.core_id == core).count()
    }

    /// Builds a set directly from its lines. Used by policy tests.
    pub fn from_lines(lines: Vec<CacheLine>) -> Self {
        Self { lines }
    }
}

/// Prior contents of the way overwritten by [`Cache::install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Set the fill went to.
    pub set_index: u64,
    /// Way that was replaced.
    pub way: usize,
    /// The replaced line as it was before the fill.
    pub line: CacheLine,
}

impl Eviction {
    /// Whether the replaced line must be written back to the next level.
    pub fn is_dirty(&self) -> bool {
        self.line.valid && self.line.dirty
    }

    /// Reconstructs a writeback address for the replaced line.
    ///
    /// The index is taken from the access that triggered the fill rather
    /// than from the evicted line. Both share a set in the evicting cache,
    /// so the result differs from the original line address only when
    /// `num_sets` is not the evicting cache's set count.
    pub fn writeback_addr(&self, num_sets: u64, trigger: LineAddr) -> LineAddr {
        LineAddr(self.line.tag * num_sets + trigger.val() % num_sets)
    }
}

/// Set-associative cache with a pluggable victim selection policy.
#[derive(Debug)]
pub struct Cache {
    sets: Vec<CacheSet>,
    num_sets: u64,
    ways: usize,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache level from its configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity, associativity and policy for this level.
    /// * `line_bytes` - Line size shared by the hierarchy.
    /// * `core0_quota` - Way quota for core 0 (partitioning policies only).
    pub fn new(config: &CacheConfig, line_bytes: u64, core0_quota: usize) -> Self {
        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyType::Fifo => Box::new(FifoPolicy::new()),
            PolicyType::StaticPartition => Box::new(StaticPartitionPolicy::new(core0_quota)),
            PolicyType::DynamicPartition => Box::new(DynamicPartitionPolicy::new(
                core0_quota,
                config.size_bytes,
                config.ways,
                line_bytes,
                PARTITIONED_CORES,
            )),
            PolicyType::CoreAgnostic => Box::new(CoreAgnosticPolicy::new()),
        };
        Self::with_policy(config.size_bytes, config.ways, line_bytes, policy)
    }

    /// Creates a cache with an explicit policy instance.
    ///
    /// The geometry must already be validated: `size_bytes` a non-zero
    /// multiple of `line_bytes * ways`.
    pub fn with_policy(
        size_bytes: u64,
        ways: usize,
        line_bytes: u64,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Self {
        let num_sets = size_bytes / (line_bytes * ways as u64);
        tracing::debug!(
            size_bytes,
            ways,
            line_bytes,
            num_sets,
            policy = policy.name(),
            "cache built"
        );
        Self {
            sets: (0..num_sets).map(|_| CacheSet::new(ways)).collect(),
            num_sets,
            ways,
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Number of sets.
    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Associativity.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Name of the victim selection policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Access and eviction counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The set at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets()`.
    pub fn set(&self, index: u64) -> &CacheSet {
        &self.sets[index as usize]
    }

    /// Set index of a line address.
    #[inline]
    pub fn index_of(&self, line: LineAddr) -> u64 {
        line.val() % self.num_sets
    }

    /// Tag of a line address.
    #[inline]
    pub fn tag_of(&self, line: LineAddr) -> u64 {
        line.val() / self.num_sets
    }

    /// Looks up a line, updating the access and miss counters.
    ///
    /// A write hit marks the line dirty. A miss leaves the set untouched;
    /// filling it is a separate [`install`](Self::install).
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn access(&mut self, line: LineAddr, is_write: bool, core: CoreId) -> bool {
        let index = self.index_of(line) as usize;
        let tag = self.tag_of(line);
        let check_core = self.policy.matches_core();

        let mut hit = false;
        for way in &mut self.sets[index].lines {
            if way.valid && way.tag == tag && (!check_core || way.core_id == core) {
                if is_write {
                    way.dirty = true;
                }
                hit = true;
                break;
            }
        }

        self.stats.record(is_write, hit);
        hit
    }

    /// Checks for a line without touching counters or dirty bits.
    pub fn probe(&self, line: LineAddr, core: CoreId) -> bool {
        let tag = self.tag_of(line);
        let check_core = self.policy.matches_core();
        self.sets[self.index_of(line) as usize]
            .lines
            .iter()
            .any(|way| way.valid && way.tag == tag && (!check_core || way.core_id == core))
    }

    /// Fills a line, replacing the way chosen by [`find_victim`](Self::find_victim).
    ///
    /// # Arguments
    ///
    /// * `line` - Line address to install.
    /// * `is_write` - Install the line dirty.
    /// * `core` - Owning core.
    /// * `now` - Current cycle, recorded as the insertion time.
    ///
    /// # Returns
    ///
    /// The replaced way's prior contents.
    pub fn install(&mut self, line: LineAddr, is_write: bool, core: CoreId, now: u64) -> Eviction {
        let set_index = self.index_of(line);
        let tag = self.tag_of(line);
        let way = self.find_victim(set_index, core, now);

        let slot = &mut self.sets[set_index as usize].lines[way];
        let eviction = Eviction {
            set_index,
            way,
            line: *slot,
        };
        if slot.dirty {
            self.stats.dirty_evicts += 1;
        }
        if slot.valid {
            tracing::trace!(
                set = set_index,
                way,
                tag = slot.tag,
                owner = slot.core_id,
                dirty = slot.dirty,
                "evict"
            );
        }

        *slot = CacheLine {
            valid: true,
            dirty: is_write,
            tag,
            core_id: core,
            inserted_at: now,
        };
        eviction
    }

    /// Chooses the way to replace in `set_index` for a fill by `core`.
    ///
    /// The first invalid way wins; otherwise the policy picks among the
    /// valid ways.
    ///
    /// # Panics
    ///
    /// Panics if the policy finds no candidate in a full set. With a
    /// validated configuration this means the set's ownership invariant
    /// has been broken.
    pub fn find_victim(&mut self, set_index: u64, core: CoreId, now: u64) -> usize {
        let set = &self.sets[set_index as usize];
        if let Some(way) = set.first_invalid() {
            return way;
        }
        let Some(way) = self.policy.select_victim(set, core, now) else {
            panic!(
                "{} policy found no victim in full set {set_index} for core {core}",
                self.policy.name()
            );
        };
        way
    }
}
