//! Cache Tests.
//!
//! Geometry, the modulo/divide address split, install-then-access, FIFO
//! eviction order, dirty-eviction accounting and writeback address
//! reconstruction.

use memsim_core::cache::Cache;
use memsim_core::cache::policies::FifoPolicy;
use memsim_core::common::LineAddr;
use memsim_core::config::{CacheConfig, ReplacementPolicy};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const LINE: u64 = 64;

fn fifo(size_bytes: u64, ways: usize) -> Cache {
    Cache::with_policy(size_bytes, ways, LINE, Box::new(FifoPolicy::new()))
}

// ══════════════════════════════════════════════════════════
// 1. Geometry
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(32 * 1024, 8, 64)]
#[case(1024 * 1024, 16, 1024)]
#[case(1024, 4, 4)]
#[case(256, 4, 1)]
fn set_count_is_capacity_over_line_times_ways(
    #[case] size: u64,
    #[case] ways: usize,
    #[case] sets: u64,
) {
    let cache = fifo(size, ways);
    assert_eq!(cache.num_sets(), sets);
    assert_eq!(cache.ways(), ways);
}

#[test]
fn split_is_modulo_divide_not_bit_field() {
    // 3 sets: a bit-field split cannot express this geometry.
    let cache = fifo(3 * 2 * LINE, 2);
    assert_eq!(cache.num_sets(), 3);
    assert_eq!(cache.index_of(LineAddr(10)), 1);
    assert_eq!(cache.tag_of(LineAddr(10)), 3);
}

proptest! {
    #[test]
    fn tag_and_index_recombine(sets in 1u64..2048, ways in 1usize..16, addr in 0u64..(1 << 48)) {
        let cache = fifo(sets * ways as u64 * LINE, ways);
        let line = LineAddr(addr);
        let index = cache.index_of(line);
        prop_assert!(index < sets);
        prop_assert_eq!(cache.tag_of(line) * sets + index, addr);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Install then access
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::fifo(ReplacementPolicy::Fifo)]
#[case::static_partition(ReplacementPolicy::StaticPartition)]
#[case::dynamic_partition(ReplacementPolicy::DynamicPartition)]
#[case::core_agnostic(ReplacementPolicy::CoreAgnostic)]
fn installed_line_hits_for_its_core(
    #[case] policy: ReplacementPolicy,
    #[values(false, true)] is_write: bool,
) {
    let config = CacheConfig::new(1024, 4, 1).with_policy(policy);
    let mut cache = Cache::new(&config, LINE, 2);

    for core in 0..2 {
        let line = LineAddr(100 + core as u64);
        let _ = cache.install(line, is_write, core, 5);
        assert!(cache.access(line, is_write, core), "{} missed after install", cache.policy_name());
    }
}

#[rstest]
#[case::fifo(ReplacementPolicy::Fifo, false)]
#[case::static_partition(ReplacementPolicy::StaticPartition, false)]
#[case::dynamic_partition(ReplacementPolicy::DynamicPartition, true)]
#[case::core_agnostic(ReplacementPolicy::CoreAgnostic, true)]
fn other_core_hits_only_under_owner_blind_policies(
    #[case] policy: ReplacementPolicy,
    #[case] shared: bool,
) {
    let config = CacheConfig::new(1024, 4, 1).with_policy(policy);
    let mut cache = Cache::new(&config, LINE, 2);
    let _ = cache.install(LineAddr(7), false, 0, 0);

    assert!(cache.probe(LineAddr(7), 0));
    assert_eq!(cache.probe(LineAddr(7), 1), shared);
    assert_eq!(cache.access(LineAddr(7), true, 1), shared);
    assert_eq!(cache.set(3).lines()[0].dirty, shared);
}

#[test]
fn install_overwrites_only_the_victim_way() {
    let mut cache = fifo(256, 4);
    for (t, line) in (0..4).enumerate() {
        let _ = cache.install(LineAddr(line), false, 0, t as u64);
    }
    let _ = cache.install(LineAddr(4), false, 0, 10);

    assert!(!cache.probe(LineAddr(0), 0));
    for line in 1..=4 {
        assert!(cache.probe(LineAddr(line), 0), "line {line} should still be resident");
    }
}

// ══════════════════════════════════════════════════════════
// 3. FIFO eviction order
// ══════════════════════════════════════════════════════════

#[test]
fn fifo_evicts_oldest_insertion() {
    let mut cache = fifo(256, 4);
    for (i, t) in [10u64, 20, 30, 40].into_iter().enumerate() {
        let eviction = cache.install(LineAddr(i as u64), false, 0, t);
        assert!(!eviction.line.valid);
        assert_eq!(eviction.way, i);
    }

    let eviction = cache.install(LineAddr(4), false, 0, 50);
    assert_eq!(eviction.way, 0);
    assert_eq!(eviction.line.tag, 0);
    assert_eq!(eviction.line.inserted_at, 10);
}

#[test]
fn hits_do_not_refresh_insertion_time() {
    let mut cache = fifo(256, 4);
    for line in 0..4 {
        let _ = cache.install(LineAddr(line), false, 0, line);
    }
    assert!(cache.access(LineAddr(0), false, 0));
    assert!(cache.access(LineAddr(0), true, 0));

    let eviction = cache.install(LineAddr(9), false, 0, 100);
    assert_eq!(eviction.line.tag, 0);
}

#[test]
fn fifo_ties_go_to_lowest_way() {
    let mut cache = fifo(256, 4);
    for line in 0..4 {
        let _ = cache.install(LineAddr(line), false, 0, 7);
    }
    assert_eq!(cache.install(LineAddr(4), false, 0, 7).way, 0);
}

// ══════════════════════════════════════════════════════════
// 4. Dirty-eviction accounting
// ══════════════════════════════════════════════════════════

#[test]
fn dirty_evictions_count_only_dirty_victims() {
    let mut cache = fifo(256, 4);

    for line in 0..4 {
        let _ = cache.install(LineAddr(line), line % 2 == 0, 0, line);
    }
    assert_eq!(cache.stats().dirty_evicts, 0, "fills of invalid ways never count");

    // Victims in order: line 0 (dirty), 1 (clean), 2 (dirty), 3 (clean).
    let expected = [1, 1, 2, 2];
    for (i, want) in expected.into_iter().enumerate() {
        let eviction = cache.install(LineAddr(10 + i as u64), false, 0, 10 + i as u64);
        assert_eq!(eviction.is_dirty(), i % 2 == 0);
        assert_eq!(cache.stats().dirty_evicts, want);
    }
}

#[test]
fn write_hit_makes_a_clean_line_dirty_on_eviction() {
    let mut cache = fifo(128, 2);
    let _ = cache.install(LineAddr(0), false, 0, 0);
    let _ = cache.install(LineAddr(1), false, 0, 1);
    assert!(cache.access(LineAddr(0), true, 0));

    let eviction = cache.install(LineAddr(2), false, 0, 2);
    assert!(eviction.is_dirty());
    assert_eq!(cache.stats().dirty_evicts, 1);
}

#[test]
fn access_counters_split_by_direction() {
    let mut cache = fifo(1024, 4);
    assert!(!cache.access(LineAddr(3), false, 0));
    let _ = cache.install(LineAddr(3), false, 0, 0);
    assert!(cache.access(LineAddr(3), false, 0));
    assert!(cache.access(LineAddr(3), true, 0));
    assert!(!cache.access(LineAddr(4), true, 0));

    let stats = cache.stats();
    assert_eq!((stats.read_access, stats.read_miss), (2, 1));
    assert_eq!((stats.write_access, stats.write_miss), (2, 1));
}

// ══════════════════════════════════════════════════════════
// 5. Writeback address reconstruction
// ══════════════════════════════════════════════════════════

#[test]
fn writeback_address_uses_trigger_index() {
    let mut cache = fifo(1024, 1);
    assert_eq!(cache.num_sets(), 16);
    let _ = cache.install(LineAddr(35), true, 0, 0);

    let eviction = cache.install(LineAddr(51), false, 0, 1);
    assert_eq!(eviction.set_index, 3);
    assert_eq!(eviction.line.tag, 2);

    // Same set count: the original line comes back.
    assert_eq!(eviction.writeback_addr(16, LineAddr(51)), LineAddr(35));
    // Another level's set count mixes the victim tag with the trigger index.
    assert_eq!(eviction.writeback_addr(32, LineAddr(51)), LineAddr(2 * 32 + 19));
}
