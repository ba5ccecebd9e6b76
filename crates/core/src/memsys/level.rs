//! Cache levels and the requests that flow between them.
//!
//! A level serves a [`Request`] against its cache and, on a miss, asks the
//! [`NextLevel`] below it for the line. Every dirty victim it evicts turns
//! into a writeback request to the same next level, issued synchronously
//! before the call returns.

use crate::cache::Cache;
use crate::common::{CoreId, LineAddr};
use crate::dram::Dram;

/// One access travelling down the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    /// Physical line address.
    pub line: LineAddr,
    /// The access dirties the line.
    pub is_write: bool,
    /// The access carries a dirty victim from the level above.
    pub is_writeback: bool,
    /// Requesting core.
    pub core: CoreId,
    /// Current cycle.
    pub now: u64,
}

impl Request {
    /// A demand read or write from the level above.
    pub fn demand(line: LineAddr, is_write: bool, core: CoreId, now: u64) -> Self {
        Self {
            line,
            is_write,
            is_writeback: false,
            core,
            now,
        }
    }

    /// A writeback of a dirty line evicted by the level above.
    pub fn writeback(line: LineAddr, core: CoreId, now: u64) -> Self {
        Self {
            line,
            is_write: true,
            is_writeback: true,
            core,
            now,
        }
    }
}

/// Anything a cache level can miss into.
pub trait NextLevel {
    /// Serves a request and returns its latency in cycles.
    fn serve(&mut self, req: Request) -> u64;
}

impl NextLevel for Dram {
    fn serve(&mut self, req: Request) -> u64 {
        self.access(req.line, req.is_write)
    }
}

/// A cache plus its hit latency.
#[derive(Debug)]
pub struct Level {
    /// The cache array.
    pub cache: Cache,
    /// Hit latency in cycles.
    pub latency: u64,
}

impl Level {
    /// Creates a level.
    pub fn new(cache: Cache, latency: u64) -> Self {
        Self { cache, latency }
    }

    /// Serves a request, missing into `next`.
    ///
    /// A demand miss costs this level's latency plus the latency of the read
    /// from `next`. A writeback that misses is installed dirty without
    /// reading `next`, and costs only this level's latency. Latency of
    /// writebacks this level issues is not charged to the caller.
    ///
    /// # Arguments
    ///
    /// * `req` - The request to serve.
    /// * `next` - The level below, for fills and writebacks.
    ///
    /// # Returns
    ///
    /// The latency of the request in cycles.
    pub fn serve<N: NextLevel + ?Sized>(&mut self, req: Request, next: &mut N) -> u64 {
        if self.cache.access(req.line, req.is_write, req.core) {
            return self.latency;
        }

        let delay = if req.is_writeback {
            self.latency
        } else {
            self.latency + next.serve(Request::demand(req.line, false, req.core, req.now))
        };

        let eviction = self.cache.install(req.line, req.is_write, req.core, req.now);
        if eviction.is_dirty() {
            let victim = eviction.writeback_addr(self.cache.num_sets(), req.line);
            tracing::trace!(victim = victim.val(), set = eviction.set_index, "writeback");
            let _ = next.serve(Request::writeback(victim, req.core, req.now));
        }
        delay
    }
}

/// The shared levels below the L1s: a unified L2 over DRAM.
#[derive(Debug)]
pub struct SharedLevels {
    /// Unified L2.
    pub l2: Level,
    /// Main memory.
    pub dram: Dram,
}

impl NextLevel for SharedLevels {
    fn serve(&mut self, req: Request) -> u64 {
        self.l2.serve(req, &mut self.dram)
    }
}
