//! Common types shared by every level of the simulated memory hierarchy.
//!
//! This module provides:
//! 1. **Address Types:** Newtypes for byte, line, virtual and physical addresses.
//! 2. **Access Types:** Classification of references (fetch/load/store).
//! 3. **Constants:** Page size, default latencies and DRAM timing parameters.
//! 4. **Errors:** Configuration errors reported before any component is built.

/// Address type definitions (line, virtual and physical addresses).
pub mod addr;

/// Hierarchy-wide constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Configuration error types.
pub mod error;

pub use addr::{LineAddr, PhysAddr, VirtAddr};
pub use constants::PAGE_SIZE;
pub use data::{AccessType, CoreId};
pub use error::ConfigError;
