//! Per-core virtual-to-physical translation.
//!
//! In the multi-core topology each core's virtual pages are folded into a
//! disjoint region of the physical space, so the shared L2 and DRAM see a
//! single physical index space with no aliasing between cores. The mapping
//! is fixed arithmetic rather than a page table:
//!
//! ```text
//! tail = vpn & 0xFFFFF          (low 20 bits)
//! head = vpn >> 20
//! pfn  = tail + (core << 21) + (head << 21)
//! ```
//!
//! All arithmetic wraps modulo 2^64, so every 64-bit virtual address has a
//! physical image.

use crate::common::{CoreId, LineAddr, PhysAddr, VirtAddr};

/// Low VPN bits kept in place by the translation.
const VPN_TAIL_MASK: u64 = 0xF_FFFF;

/// Bits of VPN kept in the tail.
const VPN_TAIL_BITS: u32 = 20;

/// Shift applied to both the core id and the VPN head.
const PFN_CORE_SHIFT: u32 = 21;

/// Maps a virtual page number of `core` to its physical frame number.
///
/// Only cores 0 and 1 are supported; the configuration layer rejects any
/// other core count before a multi-core system is built.
///
/// # Examples
///
/// ```
/// use memsim_core::memsys::translate::vpn_to_pfn;
///
/// assert_eq!(vpn_to_pfn(5, 1), 5 + (1 << 21));
/// assert_eq!(vpn_to_pfn(5, 0), 5);
/// ```
pub fn vpn_to_pfn(vpn: u64, core: CoreId) -> u64 {
    debug_assert!(core < 2, "translation supports cores 0 and 1, got {core}");
    let tail = vpn & VPN_TAIL_MASK;
    let head = vpn >> VPN_TAIL_BITS;
    tail.wrapping_add((core as u64) << PFN_CORE_SHIFT).wrapping_add(head << PFN_CORE_SHIFT)
}

/// Translates a virtual byte address issued by `core`.
pub fn to_physical(vaddr: VirtAddr, core: CoreId) -> PhysAddr {
    PhysAddr::from_frame(vpn_to_pfn(vaddr.vpn(), core), vaddr.page_offset())
}

/// Translates a virtual line address issued by `core` to a physical line address.
pub fn physical_line(vline: LineAddr, core: CoreId, line_bytes: u64) -> LineAddr {
    to_physical(VirtAddr::new(vline.to_byte(line_bytes)), core).line(line_bytes)
}
