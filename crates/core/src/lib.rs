//! Trace-driven memory hierarchy simulator.
//!
//! This crate models a configurable cache hierarchy and DRAM with the following:
//! 1. **Caches:** Set-associative arrays with FIFO, way-partitioned and core-agnostic
//!    victim selection.
//! 2. **DRAM:** Fixed-latency or per-bank row-buffer timing under closed/open page policies.
//! 3. **Memory system:** L1-I/L1-D over a shared L2 and DRAM, writeback propagation,
//!    and per-core address translation for two-core runs.
//! 4. **Configuration and statistics:** Serde-backed configuration with validation, and
//!    read-only counters with a text report.
//!
//! The cycle counter is owned by the caller and passed to every access.

/// Set-associative cache, victim selection policies and utility monitors.
pub mod cache;
/// Common types (addresses, access kinds, constants, errors).
pub mod common;
/// Simulator configuration (defaults, presets, validation).
pub mod config;
/// DRAM and its timing controllers.
pub mod dram;
/// Multi-level orchestration, writebacks and translation.
pub mod memsys;
/// Counters and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()`, `Config::preset(..)` or
/// `Config::from_json(..)`.
pub use crate::config::Config;
/// Top-level hierarchy; construct with `MemorySystem::new`.
pub use crate::memsys::MemorySystem;
