//! Memory Access Types.
//!
//! Every reference in a trace is tagged with a kind and the id of the core
//! that issued it. The kind selects the L1 (instruction or data) and whether
//! the access dirties the line.

use serde::{Deserialize, Serialize};

/// Identifier of the requesting core.
pub type CoreId = usize;

/// Type of memory reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessType {
    /// Instruction fetch; served by the instruction cache, never dirties a line.
    Fetch,

    /// Data load; served by the data cache.
    Load,

    /// Data store; served by the data cache and marks the line dirty.
    Store,
}

impl AccessType {
    /// Whether this reference writes the line it touches.
    #[inline]
    pub fn is_write(self) -> bool {
        matches!(self, Self::Store)
    }

    /// Whether this reference is routed to the instruction cache.
    #[inline]
    pub fn is_fetch(self) -> bool {
        matches!(self, Self::Fetch)
    }
}
