//! Main Memory (DRAM).
//!
//! Wraps a [`MemoryController`] with the read/write access and delay
//! counters reported at the end of a run. The DRAM model is independent
//! of the caches: it only ever sees line addresses and a direction.

/// Memory controller implementations for access latency modeling.
pub mod controller;

use self::controller::{MemoryController, RowBufferController, SimpleController};
use crate::common::LineAddr;
use crate::config::{MemoryConfig, MemoryController as ControllerType};
use crate::stats::DramStats;

/// DRAM with a timing controller and cumulative statistics.
#[derive(Debug)]
pub struct Dram {
    controller: Box<dyn MemoryController>,
    stats: DramStats,
}

impl Dram {
    /// Builds DRAM from the memory configuration. All banks start closed.
    pub fn new(config: &MemoryConfig, line_bytes: u64) -> Self {
        let controller: Box<dyn MemoryController> = match config.controller {
            ControllerType::Simple => Box::new(SimpleController::new(config.fixed_latency)),
            ControllerType::Dram => {
                Box::new(RowBufferController::new(line_bytes, config.page_policy))
            }
        };
        tracing::debug!(
            controller = ?config.controller,
            page_policy = ?config.page_policy,
            "dram built"
        );
        Self::with_controller(controller)
    }

    /// Builds DRAM around an explicit controller.
    pub fn with_controller(controller: Box<dyn MemoryController>) -> Self {
        Self {
            controller,
            stats: DramStats::default(),
        }
    }

    /// Services one access and returns its latency in cycles.
    pub fn access(&mut self, line: LineAddr, is_write: bool) -> u64 {
        let delay = self.controller.access_latency(line);
        self.stats.record(is_write, delay);
        delay
    }

    /// Access and delay counters.
    pub fn stats(&self) -> &DramStats {
        &self.stats
    }
}
