//! Address types.
//!
//! Byte addresses come in two flavours, virtual (as seen in the trace) and
//! physical (after per-core translation). Every cache and DRAM operation is
//! keyed by a [`LineAddr`], the byte address divided by the line size.

use super::constants::{PAGE_SHIFT, PAGE_SIZE};

/// A cache-line address: byte address divided by the line size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineAddr(pub u64);

/// A virtual byte address as issued by a core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct VirtAddr(pub u64);

/// A physical byte address, shared by every core below the private L1s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhysAddr(pub u64);

impl LineAddr {
    /// Converts a byte address to a line address.
    #[inline(always)]
    pub fn from_byte(addr: u64, line_bytes: u64) -> Self {
        Self(addr / line_bytes)
    }

    /// Returns the raw line number.
    #[inline(always)]
    pub fn val(self) -> u64 {
        self.0
    }

    /// Returns the byte address of the first byte in the line.
    #[inline(always)]
    pub fn to_byte(self, line_bytes: u64) -> u64 {
        self.0 * line_bytes
    }
}

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(self) -> u64 {
        self.0
    }

    /// Virtual page number for 4 KiB pages.
    #[inline(always)]
    pub fn vpn(self) -> u64 {
        self.0 >> PAGE_SHIFT
    }

    /// Byte offset within the 4 KiB page.
    #[inline(always)]
    pub fn page_offset(self) -> u64 {
        self.0 % PAGE_SIZE
    }
}

impl PhysAddr {
    /// Creates a physical address from a frame number and a page offset.
    ///
    /// Wraps modulo 2^64: frames past the top of the address space fold
    /// back to low physical addresses instead of overflowing.
    #[inline(always)]
    pub fn from_frame(pfn: u64, offset: u64) -> Self {
        Self(pfn.wrapping_mul(PAGE_SIZE).wrapping_add(offset))
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(self) -> u64 {
        self.0
    }

    /// Line address of this physical byte address.
    #[inline(always)]
    pub fn line(self, line_bytes: u64) -> LineAddr {
        LineAddr::from_byte(self.0, line_bytes)
    }
}
