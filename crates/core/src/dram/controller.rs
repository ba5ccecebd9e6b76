//! Memory controller implementations for latency modeling.
//!
//! This module provides:
//! 1. **SimpleController:** Fixed latency per access (no bank state).
//! 2. **RowBufferController:** Per-bank row buffers with activate, CAS,
//!    precharge and bus timing under a closed- or open-page policy.

use std::fmt;

use crate::common::LineAddr;
use crate::common::constants::{
    DRAM_BANKS, DRAM_MAX_BANKS, ROW_BUFFER_BYTES, T_ACT, T_BUS, T_CAS, T_PRE,
};
use crate::config::PagePolicy;

/// Trait for memory controllers that report access latency in cycles.
pub trait MemoryController: Send + Sync + fmt::Debug {
    /// Returns the number of cycles required to access `line`.
    fn access_latency(&mut self, line: LineAddr) -> u64;
}

/// Fixed-latency memory controller; every access takes the same number of cycles.
#[derive(Debug, Clone, Copy)]
pub struct SimpleController {
    latency: u64,
}

impl SimpleController {
    /// Creates a simple controller with the given fixed latency in cycles.
    pub fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _line: LineAddr) -> u64 {
        self.latency
    }
}

/// Open-row state of one bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowBufEntry {
    /// A row is open in this bank.
    pub valid: bool,
    /// The open row, meaningful only when `valid`.
    pub row_id: u64,
}

/// Where an access landed relative to the bank's open row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowOutcome {
    Empty,
    Hit,
    Conflict,
}

/// Row-buffer DRAM timing model.
///
/// Lines are interleaved across banks: `bank = line % banks`, and
/// `row = (line / lines_per_row) / banks` with `lines_per_row` the number
/// of lines that fit in the 1 KiB row buffer.
#[derive(Debug, Clone)]
pub struct RowBufferController {
    banks: Vec<RowBufEntry>,
    num_banks: u64,
    lines_per_row: u64,
    page_policy: PagePolicy,
}

impl RowBufferController {
    /// Creates a controller with every bank closed.
    ///
    /// # Arguments
    ///
    /// * `line_bytes` - Cache line size; must divide the row buffer size.
    /// * `page_policy` - Row-buffer management policy.
    pub fn new(line_bytes: u64, page_policy: PagePolicy) -> Self {
        Self {
            banks: vec![RowBufEntry::default(); DRAM_MAX_BANKS],
            num_banks: DRAM_BANKS,
            lines_per_row: ROW_BUFFER_BYTES / line_bytes,
            page_policy,
        }
    }

    /// Row-buffer state of `bank`.
    pub fn bank(&self, bank: usize) -> RowBufEntry {
        self.banks[bank]
    }

    /// Bank a line maps to.
    pub fn bank_of(&self, line: LineAddr) -> u64 {
        line.val() % self.num_banks
    }

    /// Row a line maps to within its bank.
    pub fn row_of(&self, line: LineAddr) -> u64 {
        (line.val() / self.lines_per_row) / self.num_banks
    }

    fn open(&mut self, line: LineAddr) -> RowOutcome {
        let row_id = self.row_of(line);
        let bank = self.bank_of(line) as usize;
        let entry = &mut self.banks[bank];
        let outcome = match *entry {
            RowBufEntry { valid: false, .. } => RowOutcome::Empty,
            RowBufEntry { row_id: open, .. } if open == row_id => RowOutcome::Hit,
            _ => RowOutcome::Conflict,
        };
        if outcome != RowOutcome::Hit {
            *entry = RowBufEntry { valid: true, row_id };
        }
        outcome
    }
}

impl MemoryController for RowBufferController {
    fn access_latency(&mut self, line: LineAddr) -> u64 {
        let outcome = self.open(line);
        tracing::trace!(line = line.val(), ?outcome, "row buffer");
        match (self.page_policy, outcome) {
            (PagePolicy::Closed, RowOutcome::Empty) => T_ACT + T_CAS + T_BUS,
            (PagePolicy::Closed, RowOutcome::Hit) => T_CAS + T_BUS,
            (PagePolicy::Closed, RowOutcome::Conflict) => T_PRE + T_ACT + T_CAS + T_BUS,
            // The open-page model never charges precharge, and charges
            // activate even on a row hit.
            (PagePolicy::Open, RowOutcome::Hit) => T_CAS + T_ACT + T_BUS,
            (PagePolicy::Open, RowOutcome::Empty | RowOutcome::Conflict) => T_ACT + T_CAS + T_BUS,
        }
    }
}
