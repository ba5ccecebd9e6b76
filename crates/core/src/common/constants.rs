//! Hierarchy-wide constants.

/// Page size used by the multi-core address translation.
pub const PAGE_SIZE: u64 = 4096;

/// `log2(PAGE_SIZE)`.
pub const PAGE_SHIFT: u32 = 12;

/// L1 data cache hit latency in cycles.
pub const DCACHE_HIT_LATENCY: u64 = 1;

/// L1 instruction cache hit latency in cycles.
pub const ICACHE_HIT_LATENCY: u64 = 1;

/// Shared L2 hit latency in cycles.
pub const L2CACHE_HIT_LATENCY: u64 = 10;

/// Flat DRAM cost when no timing model is configured.
pub const FIXED_DRAM_LATENCY: u64 = 100;

/// Number of DRAM banks.
pub const DRAM_BANKS: u64 = 16;

/// Upper bound on the bank array.
pub const DRAM_MAX_BANKS: usize = 256;

/// Row buffer size in bytes.
pub const ROW_BUFFER_BYTES: u64 = 1024;

/// Row activation latency.
pub const T_ACT: u64 = 45;

/// Column access strobe latency.
pub const T_CAS: u64 = 45;

/// Precharge latency.
pub const T_PRE: u64 = 45;

/// Data bus transfer latency.
pub const T_BUS: u64 = 10;

/// Cycles between dynamic-partition quota re-derivations.
pub const PARTITION_EPOCH_CYCLES: u64 = 5_000_000;
