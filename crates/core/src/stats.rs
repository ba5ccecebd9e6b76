//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters each component exposes read-only:
//! 1. **Cache:** Read/write accesses and misses, dirty evictions.
//! 2. **DRAM:** Read/write accesses and cumulative delay.
//! 3. **Memory system:** Accesses and cumulative delay per reference kind.
//!
//! It also renders the classic end-of-run text report.

use std::io::{self, Write};

use serde::Serialize;

use crate::common::AccessType;

/// Per-cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Read lookups.
    pub read_access: u64,
    /// Write lookups.
    pub write_access: u64,
    /// Read lookups that missed.
    pub read_miss: u64,
    /// Write lookups that missed.
    pub write_miss: u64,
    /// Installs whose victim was dirty.
    pub dirty_evicts: u64,
}

impl CacheStats {
    /// Counts one lookup.
    pub fn record(&mut self, is_write: bool, hit: bool) {
        if is_write {
            self.write_access += 1;
            self.write_miss += u64::from(!hit);
        } else {
            self.read_access += 1;
            self.read_miss += u64::from(!hit);
        }
    }

    /// Read miss ratio in `[0, 1]`; zero when there were no reads.
    pub fn read_miss_ratio(&self) -> f64 {
        ratio(self.read_miss, self.read_access)
    }

    /// Write miss ratio in `[0, 1]`; zero when there were no writes.
    pub fn write_miss_ratio(&self) -> f64 {
        ratio(self.write_miss, self.write_access)
    }

    /// Writes the `<header>_*` report block.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_report(&self, header: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{header}_READ_ACCESS    \t\t : {:10}", self.read_access)?;
        writeln!(out, "{header}_WRITE_ACCESS   \t\t : {:10}", self.write_access)?;
        writeln!(out, "{header}_READ_MISS      \t\t : {:10}", self.read_miss)?;
        writeln!(out, "{header}_WRITE_MISS     \t\t : {:10}", self.write_miss)?;
        writeln!(out, "{header}_READ_MISS_PERC  \t\t : {:10.3}", 100.0 * self.read_miss_ratio())?;
        writeln!(out, "{header}_WRITE_MISS_PERC \t\t : {:10.3}", 100.0 * self.write_miss_ratio())?;
        writeln!(out, "{header}_DIRTY_EVICTS   \t\t : {:10}", self.dirty_evicts)
    }
}

/// DRAM counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DramStats {
    /// Reads serviced.
    pub read_access: u64,
    /// Writes (writebacks) serviced.
    pub write_access: u64,
    /// Cumulative read latency in cycles.
    pub read_delay: u64,
    /// Cumulative write latency in cycles.
    pub write_delay: u64,
}

impl DramStats {
    /// Counts one access and its latency.
    pub fn record(&mut self, is_write: bool, delay: u64) {
        if is_write {
            self.write_access += 1;
            self.write_delay += delay;
        } else {
            self.read_access += 1;
            self.read_delay += delay;
        }
    }

    /// Average read latency; zero when there were no reads.
    pub fn avg_read_delay(&self) -> f64 {
        ratio(self.read_delay, self.read_access)
    }

    /// Average write latency; zero when there were no writes.
    pub fn avg_write_delay(&self) -> f64 {
        ratio(self.write_delay, self.write_access)
    }

    /// Writes the `DRAM_*` report block.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "DRAM_READ_ACCESS\t\t : {:10}", self.read_access)?;
        writeln!(out, "DRAM_WRITE_ACCESS\t\t : {:10}", self.write_access)?;
        writeln!(out, "DRAM_READ_DELAY_AVG\t\t : {:10.3}", self.avg_read_delay())?;
        writeln!(out, "DRAM_WRITE_DELAY_AVG\t\t : {:10.3}", self.avg_write_delay())
    }
}

/// Per-kind counters kept by the memory system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemSysStats {
    /// Instruction fetches.
    pub ifetch_access: u64,
    /// Loads.
    pub load_access: u64,
    /// Stores.
    pub store_access: u64,
    /// Cumulative fetch latency.
    pub ifetch_delay: u64,
    /// Cumulative load latency.
    pub load_delay: u64,
    /// Cumulative store latency.
    pub store_delay: u64,
}

impl MemSysStats {
    /// Counts one reference and its latency.
    pub fn record(&mut self, kind: AccessType, delay: u64) {
        let (count, total) = match kind {
            AccessType::Fetch => (&mut self.ifetch_access, &mut self.ifetch_delay),
            AccessType::Load => (&mut self.load_access, &mut self.load_delay),
            AccessType::Store => (&mut self.store_access, &mut self.store_delay),
        };
        *count += 1;
        *total += delay;
    }

    /// Number of references of `kind`.
    pub fn accesses(&self, kind: AccessType) -> u64 {
        match kind {
            AccessType::Fetch => self.ifetch_access,
            AccessType::Load => self.load_access,
            AccessType::Store => self.store_access,
        }
    }

    /// Average latency of `kind`; zero when there were none.
    pub fn avg_delay(&self, kind: AccessType) -> f64 {
        let total = match kind {
            AccessType::Fetch => self.ifetch_delay,
            AccessType::Load => self.load_delay,
            AccessType::Store => self.store_delay,
        };
        ratio(total, self.accesses(kind))
    }

    /// Writes the `MEMSYS_*` report block.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "MEMSYS_IFETCH_ACCESS  \t\t : {:10}", self.ifetch_access)?;
        writeln!(out, "MEMSYS_LOAD_ACCESS    \t\t : {:10}", self.load_access)?;
        writeln!(out, "MEMSYS_STORE_ACCESS   \t\t : {:10}", self.store_access)?;
        writeln!(out, "MEMSYS_IFETCH_AVGDELAY\t\t : {:10.3}", self.avg_delay(AccessType::Fetch))?;
        writeln!(out, "MEMSYS_LOAD_AVGDELAY  \t\t : {:10.3}", self.avg_delay(AccessType::Load))?;
        writeln!(out, "MEMSYS_STORE_AVGDELAY \t\t : {:10.3}", self.avg_delay(AccessType::Store))
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
