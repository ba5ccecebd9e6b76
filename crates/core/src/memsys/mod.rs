//! Memory System.
//!
//! Composes caches and DRAM according to the configured [`Topology`] and
//! routes each reference through them:
//! 1. **Single cache:** one data cache, fetches bypass it, no timing.
//! 2. **Single core:** L1-I and L1-D over a unified L2 and DRAM.
//! 3. **Multi core:** private L1s per core over a shared L2 and DRAM,
//!    with per-core virtual-to-physical translation in front of the L1s.
//!
//! The memory system is the only mutator of the levels it owns. Shared
//! levels see one total order of accesses, the order of calls to
//! [`MemorySystem::access`].

/// Cache levels, requests and the next-level abstraction.
pub mod level;

/// Per-core virtual-to-physical translation.
pub mod translate;

use std::io::{self, Write};

use self::level::{Level, Request, SharedLevels};
use crate::cache::Cache;
use crate::common::{AccessType, ConfigError, CoreId, LineAddr};
use crate::config::{CacheConfig, Config, Topology};
use crate::dram::Dram;
use crate::stats::MemSysStats;

#[derive(Debug)]
enum Levels {
    SingleCache { dcache: Cache },
    Hierarchy(Hierarchy),
}

#[derive(Debug)]
struct Hierarchy {
    icaches: Vec<Level>,
    dcaches: Vec<Level>,
    shared: SharedLevels,
    translate: bool,
}

impl Hierarchy {
    fn serve(
        &mut self,
        vline: LineAddr,
        kind: AccessType,
        core: CoreId,
        now: u64,
        line_bytes: u64,
    ) -> u64 {
        let (slot, line) = if self.translate {
            (core, translate::physical_line(vline, core, line_bytes))
        } else {
            (0, vline)
        };
        let l1 = if kind.is_fetch() {
            &mut self.icaches[slot]
        } else {
            &mut self.dcaches[slot]
        };
        l1.serve(Request::demand(line, kind.is_write(), core, now), &mut self.shared)
    }
}

/// Top-level memory hierarchy.
#[derive(Debug)]
pub struct MemorySystem {
    topology: Topology,
    line_bytes: u64,
    levels: Levels,
    stats: MemSysStats,
}

impl MemorySystem {
    /// Builds the hierarchy described by `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`Config::validate`]; nothing is
    /// built from a malformed configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let line_bytes = config.cache.line_bytes;
        let quota = config.cache.swp_core0_ways;
        let topology = config.general.topology;
        let build =
            |level: &CacheConfig| Level::new(Cache::new(level, line_bytes, quota), level.latency);

        let levels = match topology {
            Topology::SingleCache => Levels::SingleCache {
                dcache: Cache::new(&config.cache.l1_d, line_bytes, quota),
            },
            Topology::SingleCore | Topology::MultiCore => {
                let cores = config.general.cores;
                Levels::Hierarchy(Hierarchy {
                    icaches: (0..cores).map(|_| build(&config.cache.l1_i)).collect(),
                    dcaches: (0..cores).map(|_| build(&config.cache.l1_d)).collect(),
                    shared: SharedLevels {
                        l2: build(&config.cache.l2),
                        dram: Dram::new(&config.memory, line_bytes),
                    },
                    translate: topology == Topology::MultiCore,
                })
            }
        };
        tracing::debug!(
            topology = topology.name(),
            cores = config.general.cores,
            "memory system built"
        );

        Ok(Self {
            topology,
            line_bytes,
            levels,
            stats: MemSysStats::default(),
        })
    }

    /// Services one reference.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address (virtual in the multi-core topology).
    /// * `kind` - Fetch, load or store.
    /// * `core` - Issuing core; must be below the configured core count.
    /// * `now` - Current cycle, recorded as the insertion time of any fill.
    ///
    /// # Returns
    ///
    /// Latency in cycles; always 0 in the single-cache topology.
    pub fn access(&mut self, addr: u64, kind: AccessType, core: CoreId, now: u64) -> u64 {
        let line = LineAddr::from_byte(addr, self.line_bytes);
        let delay = match &mut self.levels {
            Levels::SingleCache { dcache } => {
                if !kind.is_fetch() && !dcache.access(line, kind.is_write(), core) {
                    let _ = dcache.install(line, kind.is_write(), core, now);
                }
                0
            }
            Levels::Hierarchy(hierarchy) => hierarchy.serve(line, kind, core, now, self.line_bytes),
        };
        self.stats.record(kind, delay);
        delay
    }

    /// The configured topology.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Per-kind access and delay counters.
    pub fn stats(&self) -> &MemSysStats {
        &self.stats
    }

    /// Instruction cache of `core`; `None` in the single-cache topology.
    pub fn icache(&self, core: CoreId) -> Option<&Cache> {
        match &self.levels {
            Levels::SingleCache { .. } => None,
            Levels::Hierarchy(h) => h.icaches.get(core).map(|level| &level.cache),
        }
    }

    /// Data cache of `core`.
    pub fn dcache(&self, core: CoreId) -> Option<&Cache> {
        match &self.levels {
            Levels::SingleCache { dcache } => (core == 0).then_some(dcache),
            Levels::Hierarchy(h) => h.dcaches.get(core).map(|level| &level.cache),
        }
    }

    /// Shared L2; `None` in the single-cache topology.
    pub fn l2(&self) -> Option<&Cache> {
        match &self.levels {
            Levels::SingleCache { .. } => None,
            Levels::Hierarchy(h) => Some(&h.shared.l2.cache),
        }
    }

    /// DRAM; `None` in the single-cache topology.
    pub fn dram(&self) -> Option<&Dram> {
        match &self.levels {
            Levels::SingleCache { .. } => None,
            Levels::Hierarchy(h) => Some(&h.shared.dram),
        }
    }

    /// Writes the end-of-run text report.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn report(&self, out: &mut impl Write) -> io::Result<()> {
        self.stats.write_report(out)?;
        match &self.levels {
            Levels::SingleCache { dcache } => dcache.stats().write_report("DCACHE", out)?,
            Levels::Hierarchy(h) if !h.translate => {
                h.icaches[0].cache.stats().write_report("ICACHE", out)?;
                h.dcaches[0].cache.stats().write_report("DCACHE", out)?;
                h.shared.l2.cache.stats().write_report("L2CACHE", out)?;
                h.shared.dram.stats().write_report(out)?;
            }
            Levels::Hierarchy(h) => {
                for (core, (icache, dcache)) in h.icaches.iter().zip(&h.dcaches).enumerate() {
                    icache.cache.stats().write_report(&format!("ICACHE_{core}"), out)?;
                    dcache.cache.stats().write_report(&format!("DCACHE_{core}"), out)?;
                }
                h.shared.l2.cache.stats().write_report("L2CACHE", out)?;
                h.shared.dram.stats().write_report(out)?;
            }
        }
        writeln!(out)
    }
}
